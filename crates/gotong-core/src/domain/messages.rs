// SPDX-License-Identifier: Apache-2.0

//! User-facing text. Indonesian is the product language; English is kept for
//! operators running the CLI.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Id,
    En,
}

impl Locale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocaleError(pub String);

impl fmt::Display for ParseLocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale `{}` (expected `id` or `en`)", self.0)
    }
}

impl std::error::Error for ParseLocaleError {}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" | "id_id" => Ok(Self::Id),
            "en" | "en-us" | "en_us" | "en-gb" => Ok(Self::En),
            other => Err(ParseLocaleError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Message {
    WalletNotConnected,
    TransactionRejected,
    InsufficientFundsForGas,
    InsufficientFundsForDonation,
    CreateFailed,
    DonateFailed,
    CreateSucceeded,
    DonateSucceeded,
    RedirectingToCampaigns,
    TransactionInProgress,
    AllFieldsRequired,
    TargetMustBePositive,
    DeadlineMustBeFuture,
    DonationMustBePositive,
    LoadingCampaigns,
    NoCampaigns,
    NoDonators,
    CampaignNotFound,
    PageNotFound,
    CampaignsLoadFailed,
    WalletConnected,
    WalletDisconnected,
    NoWalletAccounts,
    WrongNetwork,
    ConnectWallet,
    DisconnectWallet,
    NavHome,
    NavAbout,
    NavCampaigns,
    NavCreate,
    HomeHeadline,
    HomeTagline,
    AboutHeadline,
    AboutBody,
    StatCampaigns,
    StatDonators,
    StatCollected,
    LabelTitle,
    LabelDescription,
    LabelTarget,
    LabelDeadline,
    LabelImage,
    LabelAmount,
    LabelCollected,
    LabelRemaining,
    LabelOwner,
    LabelDonators,
    SubmitCreate,
    SubmitDonation,
    ViewCampaign,
    RetryLoad,
    CampaignsHeadline,
}

impl Message {
    #[must_use]
    pub const fn text(self, locale: Locale) -> &'static str {
        let (id, en) = self.texts();
        match locale {
            Locale::Id => id,
            Locale::En => en,
        }
    }

    const fn texts(self) -> (&'static str, &'static str) {
        match self {
            Self::WalletNotConnected => (
                "Silakan hubungkan dompet Anda terlebih dahulu.",
                "Please connect your wallet first.",
            ),
            Self::TransactionRejected => (
                "Transaksi ditolak oleh pengguna.",
                "Transaction rejected by the user.",
            ),
            Self::InsufficientFundsForGas => (
                "Dana tidak mencukupi untuk biaya gas transaksi.",
                "Insufficient funds to pay the transaction gas fee.",
            ),
            Self::InsufficientFundsForDonation => (
                "Dana tidak mencukupi untuk donasi.",
                "Insufficient funds for this donation.",
            ),
            Self::CreateFailed => (
                "Gagal membuat kampanye. Coba lagi.",
                "Failed to create the campaign. Please try again.",
            ),
            Self::DonateFailed => (
                "Gagal melakukan donasi. Coba lagi.",
                "Donation failed. Please try again.",
            ),
            Self::CreateSucceeded => ("Kampanye berhasil dibuat!", "Campaign created successfully!"),
            Self::DonateSucceeded => (
                "Donasi berhasil! Terima kasih atas dukungan Anda.",
                "Donation successful! Thank you for your support.",
            ),
            Self::RedirectingToCampaigns => (
                "Mengarahkan ke daftar kampanye...",
                "Redirecting to the campaign list...",
            ),
            Self::TransactionInProgress => (
                "Transaksi sebelumnya masih diproses. Mohon tunggu.",
                "A previous transaction is still being processed. Please wait.",
            ),
            Self::AllFieldsRequired => ("Semua bidang harus diisi.", "All fields are required."),
            Self::TargetMustBePositive => (
                "Target donasi harus lebih besar dari 0.",
                "The funding target must be greater than 0.",
            ),
            Self::DeadlineMustBeFuture => (
                "Batas waktu harus tanggal yang valid di masa depan.",
                "The deadline must be a valid date in the future.",
            ),
            Self::DonationMustBePositive => (
                "Jumlah donasi harus lebih besar dari 0.",
                "The donation amount must be greater than 0.",
            ),
            Self::LoadingCampaigns => (
                "Memuat kampanye yang luar biasa...",
                "Loading campaigns...",
            ),
            Self::NoCampaigns => (
                "Belum ada kampanye. Jadilah yang pertama membuat kampanye!",
                "No campaigns yet. Be the first to create one!",
            ),
            Self::NoDonators => (
                "Belum ada donasi untuk kampanye ini. Jadilah donatur pertama!",
                "No donations for this campaign yet. Be the first donor!",
            ),
            Self::CampaignNotFound => ("Kampanye tidak ditemukan.", "Campaign not found."),
            Self::PageNotFound => ("Halaman tidak ditemukan.", "Page not found."),
            Self::CampaignsLoadFailed => (
                "Gagal memuat kampanye. Coba lagi.",
                "Failed to load campaigns. Please try again.",
            ),
            Self::WalletConnected => ("Dompet berhasil terhubung.", "Wallet connected."),
            Self::WalletDisconnected => ("Dompet telah diputuskan.", "Wallet disconnected."),
            Self::NoWalletAccounts => (
                "Tidak ada akun dompet yang tersedia.",
                "No wallet account is available.",
            ),
            Self::WrongNetwork => (
                "Dompet terhubung ke jaringan yang salah.",
                "The wallet is connected to the wrong network.",
            ),
            Self::ConnectWallet => ("Hubungkan Dompet", "Connect Wallet"),
            Self::DisconnectWallet => ("Putuskan Dompet", "Disconnect Wallet"),
            Self::NavHome => ("Beranda", "Home"),
            Self::NavAbout => ("Tentang Kami", "About Us"),
            Self::NavCampaigns => ("Kampanye", "Campaigns"),
            Self::NavCreate => ("Buat Kampanye", "Create Campaign"),
            Self::HomeHeadline => (
                "Galang dana bersama, transparan di blockchain",
                "Raise funds together, transparently on the blockchain",
            ),
            Self::HomeTagline => (
                "Setiap donasi tercatat di kontrak pintar dan dapat diperiksa siapa saja.",
                "Every donation is recorded by a smart contract and can be audited by anyone.",
            ),
            Self::AboutHeadline => ("Tentang GotongChain", "About GotongChain"),
            Self::AboutBody => (
                "GotongChain adalah platform penggalangan dana terdesentralisasi. Dana disimpan dan disalurkan oleh kontrak pintar, bukan oleh kami.",
                "GotongChain is a decentralized crowdfunding platform. Funds are held and released by a smart contract, not by us.",
            ),
            Self::StatCampaigns => ("Kampanye", "Campaigns"),
            Self::StatDonators => ("Donatur unik", "Unique donors"),
            Self::StatCollected => ("Total terkumpul (ETH)", "Total raised (ETH)"),
            Self::LabelTitle => ("Judul", "Title"),
            Self::LabelDescription => ("Deskripsi", "Description"),
            Self::LabelTarget => ("Target (ETH)", "Target (ETH)"),
            Self::LabelDeadline => ("Batas waktu", "Deadline"),
            Self::LabelImage => ("URL gambar", "Image URL"),
            Self::LabelAmount => ("Jumlah (ETH)", "Amount (ETH)"),
            Self::LabelCollected => ("Terkumpul", "Raised"),
            Self::LabelRemaining => ("Sisa waktu", "Time left"),
            Self::LabelOwner => ("Pemilik", "Owner"),
            Self::LabelDonators => ("Donatur", "Donors"),
            Self::SubmitCreate => ("Buat Kampanye", "Create Campaign"),
            Self::SubmitDonation => ("Donasi Sekarang", "Donate Now"),
            Self::ViewCampaign => ("Lihat detail", "View details"),
            Self::RetryLoad => ("Coba lagi", "Try again"),
            Self::CampaignsHeadline => ("Semua Kampanye", "All Campaigns"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_common_spellings() {
        assert_eq!("ID".parse::<Locale>(), Ok(Locale::Id));
        assert_eq!(" en-US ".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn default_locale_is_indonesian() {
        assert_eq!(
            Message::WalletNotConnected.text(Locale::default()),
            "Silakan hubungkan dompet Anda terlebih dahulu."
        );
    }
}
