use crate::err::Error;
use crate::http;
use crate::vanity::reload::ReloadGate;
use crate::vanity::request::Settings;
use crate::vanity::routes::{State, respond_to_request};
use crate::vanity::table::Duplicates;
use hyper::body::Incoming;
use std::time::Duration;

mod decide;
mod err;
pub mod opt;
mod record;
mod reload;
mod render;
pub mod request;
mod routes;
mod table;

pub async fn main(options: opt::Options) -> Result<(), Error> {
    let opt::Options {
        config,
        listen,
        key_mode,
        scheme,
        trust_forwarded_proto,
        doc_url,
        max_age,
        reject_duplicates,
    } = options;

    let duplicates = if reject_duplicates {
        Duplicates::Reject
    } else {
        Duplicates::LastWins
    };

    let state = State {
        gate: ReloadGate::new(config, duplicates),
        settings: Settings {
            key_mode,
            default_scheme: scheme,
            trust_forwarded_proto,
            doc_url,
            max_age: Duration::from_secs(max_age),
        },
    };

    // fail fast on a missing or broken import list
    let snapshot = state.gate.current().await?;
    log::info!(
        "Serving {} imports from {}",
        snapshot.table.len(),
        state.gate.path().display()
    );
    if snapshot.table.is_empty() {
        log::warn!("{} lists no imports", state.gate.path().display());
    }
    drop(snapshot);

    http::run_simple_server(listen, state, respond_to_request::<Incoming>).await?;

    Ok(())
}
