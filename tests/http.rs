use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitDto {
    id: String,
    name: String,
    completed_days: Vec<String>,
    category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WealthDto {
    id: String,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    amount: f64,
    description: String,
    category: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DayHealthDto {
    #[serde(default)]
    sleep_hours: Option<f64>,
    #[serde(default)]
    steps: Option<u32>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlannerStateDto {
    habits: Vec<HabitDto>,
    health: BTreeMap<String, DayHealthDto>,
    wealth: Vec<WealthDto>,
    last_saved: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsDto {
    income: f64,
    expense: f64,
    net: f64,
    habit_completion: u32,
    avg_sleep: f64,
    avg_steps: u32,
}

#[derive(Debug, Deserialize)]
struct ChangedDto {
    changed: bool,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "zenith_planner_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_zenith_planner"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_state(client: &Client, base_url: &str) -> PlannerStateDto {
    client
        .get(format!("{base_url}/api/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_seed_state_has_starter_habits() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let state = fetch_state(&client, &server.base_url).await;
    assert!(state.habits.len() >= 2);
    assert!(state.habits.iter().any(|h| h.name == "Morning Meditation"));
    assert!(!state.last_saved.is_empty());
}

#[tokio::test]
async fn http_add_habit_appends_and_defaults_category() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await.habits.len();

    let habit: HabitDto = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "  Read for 30 mins  ", "category": " " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(habit.name, "Read for 30 mins");
    assert_eq!(habit.category, "General");
    assert!(habit.completed_days.is_empty());

    let state = fetch_state(&client, &server.base_url).await;
    assert_eq!(state.habits.len(), before + 1);
    assert_eq!(state.habits.last().unwrap().id, habit.id);
}

#[tokio::test]
async fn http_add_habit_rejects_blank_name() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await.habits.len();

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let state = fetch_state(&client, &server.base_url).await;
    assert_eq!(state.habits.len(), before);
}

#[tokio::test]
async fn http_toggle_habit_twice_restores() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit: HabitDto = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "Evening walk", "category": "Health" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let toggle_url = format!("{}/api/habits/{}/toggle", server.base_url, habit.id);
    let body = serde_json::json!({ "date": "2026-03-02" });

    let first: ChangedDto = client
        .post(&toggle_url)
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(first.changed);

    let state = fetch_state(&client, &server.base_url).await;
    let toggled = state.habits.iter().find(|h| h.id == habit.id).unwrap();
    assert!(toggled.completed_days.contains(&"2026-03-02".to_string()));

    let second: ChangedDto = client
        .post(&toggle_url)
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(second.changed);

    let state = fetch_state(&client, &server.base_url).await;
    let toggled = state.habits.iter().find(|h| h.id == habit.id).unwrap();
    assert!(toggled.completed_days.is_empty());
}

#[tokio::test]
async fn http_toggle_unknown_habit_is_noop() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let result: ChangedDto = client
        .post(format!("{}/api/habits/nope/toggle", server.base_url))
        .json(&serde_json::json!({ "date": "2026-03-02" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!result.changed);

    let response = client
        .post(format!("{}/api/habits/nope/toggle", server.base_url))
        .json(&serde_json::json!({ "date": "not-a-date" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_wealth_sign_decides_kind() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let entry: WealthDto = client
        .post(format!("{}/api/wealth", server.base_url))
        .json(&serde_json::json!({ "description": "Rent", "category": "Housing", "amount": -42.50 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(entry.kind, "expense");
    assert_eq!(entry.amount, 42.50);
    assert_eq!(entry.description, "Rent");
    assert_eq!(entry.category, "Housing");

    // newest entry leads the ledger
    let state = fetch_state(&client, &server.base_url).await;
    assert_eq!(state.wealth.first().unwrap().id, entry.id);

    let removed: ChangedDto = client
        .delete(format!("{}/api/wealth/{}", server.base_url, entry.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(removed.changed);
}

#[tokio::test]
async fn http_wealth_rejects_zero_and_blank() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await.wealth.len();

    let response = client
        .post(format!("{}/api/wealth", server.base_url))
        .json(&serde_json::json!({ "description": "Rent", "amount": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(format!("{}/api/wealth", server.base_url))
        .json(&serde_json::json!({ "description": "  ", "amount": 10.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let state = fetch_state(&client, &server.base_url).await;
    assert_eq!(state.wealth.len(), before);
}

#[tokio::test]
async fn http_stats_reflect_new_wealth() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let salary: WealthDto = client
        .post(format!("{}/api/wealth", server.base_url))
        .json(&serde_json::json!({ "description": "Salary", "category": "Work", "amount": 1000.0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let _rent: WealthDto = client
        .post(format!("{}/api/wealth", server.base_url))
        .json(&serde_json::json!({ "description": "Rent", "category": "Housing", "amount": -200.0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Query the month the server stamped on the entry so the test does not
    // straddle a month boundary.
    let year: i32 = salary.date[0..4].parse().unwrap();
    let month: u32 = salary.date[5..7].parse().unwrap();

    let stats: StatsDto = client
        .get(format!(
            "{}/api/stats?year={year}&month={month}",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(stats.income >= 1000.0);
    assert!(stats.expense >= 200.0);
    assert_eq!(stats.net, stats.income - stats.expense);

    for entry in fetch_state(&client, &server.base_url)
        .await
        .wealth
        .iter()
        .filter(|w| w.id == salary.id || w.description == "Rent")
    {
        let removed: ChangedDto = client
            .delete(format!("{}/api/wealth/{}", server.base_url, entry.id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(removed.changed);
    }
}

#[tokio::test]
async fn http_stats_reject_bad_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/stats?year=2026&month=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_health_upsert_merges_and_clamps() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let url = format!("{}/api/health/2026-03-05", server.base_url);

    let record: DayHealthDto = client
        .put(&url)
        .json(&serde_json::json!({ "field": "sleepHours", "value": 7.5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record.sleep_hours, Some(7.5));
    assert_eq!(record.steps, None);

    let record: DayHealthDto = client
        .put(&url)
        .json(&serde_json::json!({ "field": "steps", "value": 4000 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record.sleep_hours, Some(7.5));
    assert_eq!(record.steps, Some(4000));

    // out-of-range values are clamped at the input layer
    let record: DayHealthDto = client
        .put(&url)
        .json(&serde_json::json!({ "field": "sleepHours", "value": 20.0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record.sleep_hours, Some(12.0));

    let record: DayHealthDto = client
        .put(&url)
        .json(&serde_json::json!({ "field": "notes", "value": "slept early" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record.notes.as_deref(), Some("slept early"));

    let state = fetch_state(&client, &server.base_url).await;
    let stored = state.health.get("2026-03-05").unwrap();
    assert_eq!(stored.sleep_hours, Some(12.0));
    assert_eq!(stored.steps, Some(4000));

    // the lone March record drives the monthly averages
    let stats: StatsDto = client
        .get(format!("{}/api/stats?year=2026&month=3", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats.avg_sleep, 12.0);
    assert_eq!(stats.avg_steps, 4000);
    assert_eq!(stats.habit_completion, 0);

    let response = client
        .put(format!("{}/api/health/March-5", server.base_url))
        .json(&serde_json::json!({ "field": "steps", "value": 4000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}
