use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const PROVIDER_ENV: [&str; 4] = [
    "AZURE_OPENAI_API_KEY",
    "AZURE_OPENAI_ENDPOINT",
    "AZURE_OPENAI_DEPLOYMENT",
    "AZURE_OPENAI_API_VERSION",
];

fn postchat_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("postchat");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/postchat.sqlite"

[server]
bind = "127.0.0.1:0"

[provider]
timeout_secs = 5
"#,
        root.display()
    );

    let config_path = config_dir.join("postchat.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_postchat(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = postchat_binary();
    let mut cmd = Command::new(&binary);
    for var in PROVIDER_ENV {
        cmd.env_remove(var);
    }
    let output = cmd
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run postchat binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

async fn seed_posts(config_path: &Path, posts: &[(&str, Option<&str>, &str)]) {
    let cfg = postchat::config::parse_config(&fs::read_to_string(config_path).unwrap()).unwrap();
    let pool = postchat::db::connect(&cfg).await.unwrap();
    for (title, date, content) in posts {
        sqlx::query("INSERT INTO posts (title, date, content, is_published) VALUES (?, ?, ?, 1)")
            .bind(*title)
            .bind(*date)
            .bind(*content)
            .execute(&pool)
            .await
            .unwrap();
    }
    pool.close().await;
}

#[test]
fn test_init_creates_database() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_postchat(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_postchat(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_postchat(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_posts_empty() {
    let (_tmp, config_path) = setup_test_env();
    run_postchat(&config_path, &["init"]);

    let (stdout, stderr, success) = run_postchat(&config_path, &["posts"]);
    assert!(success, "posts failed: {}", stderr);
    assert!(stdout.contains("No posts."));
}

#[test]
fn test_posts_without_init_fails() {
    let (_tmp, config_path) = setup_test_env();
    let (_, _, success) = run_postchat(&config_path, &["posts"]);
    assert!(!success, "posts should fail without a posts table");
}

#[tokio::test]
async fn test_posts_lists_newest_first() {
    let (_tmp, config_path) = setup_test_env();
    run_postchat(&config_path, &["init"]);
    seed_posts(
        &config_path,
        &[
            ("Older trip", Some("2023-07-01"), "<p>Rome &amp; Florence</p>"),
            ("Newer trip", Some("2024-07-01"), "<p>Lisbon</p>"),
        ],
    )
    .await;

    let (stdout, stderr, success) = run_postchat(&config_path, &["posts", "--limit", "5"]);
    assert!(success, "posts failed: {}", stderr);
    let newer = stdout.find("Newer trip").expect("newer post listed");
    let older = stdout.find("Older trip").expect("older post listed");
    assert!(newer < older);
    assert!(stdout.contains("Rome & Florence"));
    assert!(stdout.contains("2 post(s)"));
}

#[tokio::test]
async fn test_context_prints_dynamic_prompt() {
    let (_tmp, config_path) = setup_test_env();
    run_postchat(&config_path, &["init"]);
    seed_posts(
        &config_path,
        &[("Sourdough", Some("2024-01-10"), "<h1>Starter</h1><p>Feed daily</p>")],
    )
    .await;

    let (stdout, stderr, success) =
        run_postchat(&config_path, &["context", "--mode", "dynamic"]);
    assert!(success, "context failed: {}", stderr);
    assert!(stdout.contains("MODE: DYNAMIC"));
    assert!(stdout.contains("OPTIONAL CONTEXT START"));
    assert!(stdout.contains("כותרת: Sourdough"));
    assert!(stdout.contains("Starter Feed daily"));
    assert!(!stdout.contains("2024-01-10"));
}

#[test]
fn test_context_default_is_strict() {
    let (_tmp, config_path) = setup_test_env();
    run_postchat(&config_path, &["init"]);

    let (stdout, _, success) = run_postchat(&config_path, &["context"]);
    assert!(success);
    assert!(stdout.contains("MODE: STRICT"));
    assert!(stdout.contains("CONTEXT START\n\nCONTEXT END"));
}

#[test]
fn test_chat_without_credentials_is_configuration_error() {
    let (_tmp, config_path) = setup_test_env();
    run_postchat(&config_path, &["init"]);

    let (_, stderr, success) = run_postchat(&config_path, &["chat", "hello"]);
    assert!(!success);
    assert!(
        stderr.contains("configuration error"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_unknown_mode_rejected() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_postchat(&config_path, &["context", "--mode", "hybrid"]);
    assert!(!success);
    assert!(stderr.contains("unknown mode"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_postchat(&tmp.path().join("nope.toml"), &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
