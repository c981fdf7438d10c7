//! Run a SOQL query and print the records as JSON.
//!
//! Authenticates with `SF_INSTANCE_URL` + `SF_ACCESS_TOKEN` when set,
//! otherwise logs in with `SF_USERNAME`, `SF_PASSWORD` and
//! `SF_SECURITY_TOKEN`.
//!
//! ```sh
//! export SF_USERNAME=ada@example.com SF_PASSWORD=... SF_SECURITY_TOKEN=...
//! RUST_LOG=forcelink_rest=debug cargo run --bin forcelink-query -- "SELECT Id, Name FROM Account"
//! cargo run --bin forcelink-query -- --tooling "SELECT Id, Name FROM ApexClass"
//! ```

use forcelink::{LoginCredentials, SalesforceCredentials, Session, SessionConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut tooling = false;
    let mut soql = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tooling" => tooling = true,
            _ => soql = Some(arg),
        }
    }
    let soql = soql.unwrap_or_else(|| {
        eprintln!("Usage: forcelink-query [--tooling] \"SELECT ... FROM ...\"");
        std::process::exit(2);
    });

    let session = connect().await.unwrap_or_else(|e| {
        eprintln!("Error: Failed to authenticate: {e}");
        std::process::exit(1);
    });
    let session = if tooling { session.tooling() } else { session };

    let records = session.query_all(&soql).await.unwrap_or_else(|e| {
        eprintln!("Error: Query failed: {e}");
        std::process::exit(1);
    });

    match serde_json::to_string_pretty(&records) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: Failed to encode records: {e}");
            std::process::exit(1);
        }
    }
    eprintln!("{} record(s)", records.len());
}

async fn connect() -> forcelink::Result<Session> {
    if let Ok(creds) = SalesforceCredentials::from_env() {
        return Session::from_credentials(&creds);
    }
    let session = Session::new(SessionConfig::default())?;
    session.login_with(&LoginCredentials::from_env()?).await?;
    Ok(session)
}
