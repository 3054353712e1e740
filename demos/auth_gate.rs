//! Auth gate - short-circuit and shared-store example.
//!
//! This example demonstrates:
//! - Composing handlers with the `chain!` macro
//! - Rejecting a request before the data handler runs
//! - Handing data to a later handler through the request store
//! - Wrapping the downstream chain to log its outcome
//!
//! Run with `RUST_LOG=debug cargo run --example auth_gate` to see each step.

use handler_chain::{chain, HandlerResult, Next, RequestStore, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Incoming request.
#[derive(Clone, Debug)]
struct Request {
    token: Option<String>,
}

/// User resolved by the auth handler.
#[derive(Serialize, Deserialize, Debug)]
struct User {
    name: String,
}

async fn log_outcome(req: Request, next: Next<Request>, _store: RequestStore) -> HandlerResult {
    tracing::info!("request {:?}", req);
    let res = next.run().await?;
    tracing::info!("responded with {}", res.status());
    Ok(res)
}

async fn auth(req: Request, next: Next<Request>, store: RequestStore) -> HandlerResult {
    match req.token.as_deref() {
        Some("secret") => {
            store.set_as("user", &User { name: "ada".to_string() })?;
            next.run().await
        }
        _ => Ok(Response::with_status(
            401,
            json!({ "message": "Not Authenticated!!" }),
        )),
    }
}

async fn get_data(_req: Request, _next: Next<Request>, store: RequestStore) -> HandlerResult {
    let user: Option<User> = store.get_as("user")?;
    Ok(Response::json(json!({ "message": "Got It!!", "user": user })))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let get = chain![log_outcome, auth, get_data];

    for token in [None, Some("secret".to_string())] {
        let res = get.call(Request { token }).await?;
        println!("{} {}", res.status(), res.body());
    }

    let empty: handler_chain::Chain<Request> = chain![];
    let res = empty.call(Request { token: None }).await?;
    println!("{} {}", res.status(), res.body());

    Ok(())
}
