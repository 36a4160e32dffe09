// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddr;
use std::sync::Arc;

use gotong_contract::{ContractError, FakeContract};
use gotong_core::{FixedClock, Locale};
use gotong_model::{RawCampaign, WalletAddress};
use gotong_server::{build_router, AppState};
use gotong_service::CampaignService;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

// 2025-10-09T08:53:20Z
const NOW: u64 = 1_760_000_000;

fn account(last: u8) -> WalletAddress {
    let mut bytes = [0u8; 20];
    bytes[19] = last;
    WalletAddress::from_bytes(bytes)
}

async fn start() -> (SocketAddr, Arc<FakeContract>, Arc<CampaignService>) {
    let clock = Arc::new(FixedClock::at(NOW));
    let chain = Arc::new(FakeContract::with_clock(clock.clone()));
    let service = Arc::new(CampaignService::new(chain.clone(), clock, Locale::Id));
    serve(chain, service).await
}

async fn serve(
    chain: Arc<FakeContract>,
    service: Arc<CampaignService>,
) -> (SocketAddr, Arc<FakeContract>, Arc<CampaignService>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("addr");
    let app = build_router(AppState::new(Arc::clone(&service)));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, chain, service)
}

async fn exchange(addr: SocketAddr, req: String) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

async fn send_raw(addr: SocketAddr, path: &str) -> (u16, String, String) {
    exchange(
        addr,
        format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    )
    .await
}

async fn post_form(addr: SocketAddr, path: &str, body: &str) -> (u16, String, String) {
    exchange(
        addr,
        format!(
            "POST {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ),
    )
    .await
}

async fn seed(chain: &FakeContract, title: &str) {
    chain
        .seed(RawCampaign {
            owner: Some(account(9).as_str().to_string()),
            title: Some(title.to_string()),
            description: Some("Bantu warga".to_string()),
            target: Some(2_000_000_000_000_000_000),
            deadline: Some(NOW + 3 * 86_400 + 4 * 3_600),
            amount_collected: Some(0),
            image: Some("https://example.com/a.png".to_string()),
            donators: Some(Vec::new()),
            donations: Some(Vec::new()),
        })
        .await;
}

#[tokio::test]
async fn list_shows_spinner_until_first_fetch_then_cards() {
    let (addr, chain, service) = start().await;
    seed(&chain, "Sumur <desa>").await;

    let (status, _, body) = send_raw(addr, "/campaigns").await;
    assert_eq!(status, 200);
    assert!(body.contains("Memuat kampanye yang luar biasa..."));
    assert!(body.contains("http-equiv=\"refresh\""));

    service.refetch().await.expect("fetch");
    let (status, head, body) = send_raw(addr, "/campaigns").await;
    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("text/html"));
    assert!(body.contains("Sumur &lt;desa&gt;"));
    assert!(body.contains("3 hari 4 jam"));
    assert!(body.contains("href=\"/campaigns/0\""));
    assert!(!body.contains("http-equiv"));
}

#[tokio::test]
async fn empty_and_failed_lists_render_their_states() {
    let (addr, chain, service) = start().await;
    service.refetch().await.expect("fetch");
    let (_, _, body) = send_raw(addr, "/campaigns").await;
    assert!(body.contains("Belum ada kampanye."));

    chain
        .fail_reads(Some(ContractError::transport("down")))
        .await;
    let (status, _, body) = post_form(addr, "/campaigns", "").await;
    assert_eq!(status, 200);
    assert!(body.contains("Gagal memuat kampanye."));
    assert!(body.contains("Coba lagi"));

    chain.fail_reads(None).await;
    let (_, _, body) = post_form(addr, "/campaigns", "").await;
    assert!(!body.contains("Gagal memuat kampanye."));
}

#[tokio::test]
async fn unknown_paths_and_ids_are_not_found() {
    let (addr, chain, _) = start().await;
    seed(&chain, "Ada").await;
    for path in ["/nope", "/campaigns/abc", "/campaigns/7"] {
        let (status, _, body) = send_raw(addr, path).await;
        assert_eq!(status, 404, "{path}");
        assert!(body.contains("tidak ditemukan"), "{path}");
    }
    let (status, _, body) = send_raw(addr, "/healthz").await;
    assert_eq!((status, body.as_str()), (200, "ok"));
}

#[tokio::test]
async fn detail_page_lists_donators_after_donation() {
    let (addr, chain, service) = start().await;
    seed(&chain, "Perahu").await;
    service.set_account(Some(account(2))).await;

    let (status, _, body) = post_form(addr, "/campaigns/0/donate", "amount=0").await;
    assert_eq!(status, 422);
    assert!(body.contains("Jumlah donasi harus lebih besar dari 0."));
    assert_eq!(chain.writes(), 0);

    let (status, _, body) = post_form(addr, "/campaigns/0/donate", "amount=0.5").await;
    assert_eq!(status, 200);
    assert!(body.contains("alert-success"));
    assert!(body.contains("<strong>0.5 ETH</strong>"));
    assert!(body.contains("25%"));
}

#[tokio::test]
async fn donating_without_wallet_shows_connect_message() {
    let (addr, chain, _) = start().await;
    seed(&chain, "Perahu").await;
    let (status, _, body) = post_form(addr, "/campaigns/0/donate", "amount=1").await;
    assert_eq!(status, 200);
    assert!(body.contains("Silakan hubungkan dompet Anda terlebih dahulu."));
    assert_eq!(chain.writes(), 0);
}

#[tokio::test]
async fn create_validates_then_submits_and_redirects() {
    let (addr, chain, service) = start().await;
    service.set_account(Some(account(1))).await;

    let (status, _, body) = post_form(
        addr,
        "/create",
        "title=Atap&description=Sekolah&target=0&deadline=2025-10-10&image=https%3A%2F%2Fexample.com%2Fa.png",
    )
    .await;
    assert_eq!(status, 422);
    assert!(body.contains("alert-error"));
    assert!(body.contains("value=\"Atap\""));

    let (status, _, body) = post_form(
        addr,
        "/create",
        "title=Atap&description=Sekolah&target=0.5&deadline=2025-10-10&image=https%3A%2F%2Fexample.com%2Fa.png",
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("Kampanye berhasil dibuat!"));
    assert!(body.contains("url=/campaigns"));
    assert_eq!(chain.writes(), 1);
    assert_eq!(service.campaigns().await.campaigns.len(), 1);
}

#[tokio::test]
async fn wallet_connect_returns_to_current_page() {
    let (addr, chain, service) = start().await;
    chain.set_accounts(vec![account(7)]).await;
    let (status, _, body) = post_form(addr, "/wallet/connect", "return_to=%2Fabout").await;
    assert_eq!(status, 200);
    assert!(body.contains("Dompet berhasil terhubung."));
    assert!(body.contains("Tentang GotongChain"));
    assert_eq!(service.account().await, Some(account(7)));

    let (_, _, body) = post_form(addr, "/wallet/disconnect", "return_to=%2Fbogus").await;
    assert!(body.contains("Dompet telah diputuskan."));
    assert!(body.contains("Hubungkan Dompet"));
    assert_eq!(service.account().await, None);
}

#[tokio::test]
async fn home_shows_platform_stats() {
    let (addr, chain, service) = start().await;
    seed(&chain, "Satu").await;
    seed(&chain, "Dua").await;
    service.refetch().await.expect("fetch");
    let (status, _, body) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("<dd>2</dd>"));
    assert!(body.contains("aria-current=\"page\""));
}

#[tokio::test]
async fn list_pages_pick_up_other_clients_changes_after_max_age() {
    let clock = Arc::new(FixedClock::at(NOW));
    let chain = Arc::new(FakeContract::with_clock(clock.clone()));
    let service = Arc::new(
        CampaignService::new(chain.clone(), clock.clone(), Locale::Id).with_max_age_secs(30),
    );
    let (addr, chain, service) = serve(chain, service).await;
    service.refetch().await.expect("fetch");
    seed(&chain, "Jembatan desa").await;

    let (_, _, body) = send_raw(addr, "/campaigns").await;
    assert!(!body.contains("Jembatan desa"));

    clock.advance(30);
    let (_, _, body) = send_raw(addr, "/campaigns").await;
    assert!(body.contains("Jembatan desa"));
    let (_, _, body) = send_raw(addr, "/").await;
    assert!(body.contains("Jembatan desa"));
    assert_eq!(chain.reads(), 2);
}
