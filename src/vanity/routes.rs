use crate::body::{self, ResponseBody};
use crate::vanity::decide::{Decision, decide};
use crate::vanity::reload::ReloadGate;
use crate::vanity::render;
use crate::vanity::request::{Inbound, Settings};
use headers::{Allow, CacheControl, ContentType, HeaderMapExt};
use hyper::header::{CONTENT_TYPE, HeaderValue, LOCATION};
use hyper::{Method, Request, Response, StatusCode};
use std::fmt::Display;
use std::iter;

#[allow(clippy::declare_interior_mutable_const)]
const TEXT_HTML_UTF_8: HeaderValue = HeaderValue::from_static("text/html; charset=utf-8");

pub struct State {
    pub gate: ReloadGate,
    pub settings: Settings,
}

pub async fn respond_to_request<B>(req: Request<B>, state: &State) -> Response<ResponseBody> {
    let snapshot = match state.gate.current().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("{} {} -> [config error] {}", req.method(), req.uri(), e);
            return server_error(e);
        }
    };

    let inbound = Inbound::from_request(&req, &state.settings);
    let key = inbound.key(state.settings.key_mode);
    let resolved = match snapshot.table.resolve(&key) {
        Some(resolved) => resolved,
        None => {
            log::info!("{} {} -> [no import for {}]", req.method(), req.uri(), key);
            return not_found();
        }
    };
    let record = resolved.record;
    log::debug!(
        "{} -> {} ({} segments stripped)",
        key,
        record.import_path,
        resolved.peeled
    );

    match decide(record, &inbound, &state.settings) {
        Decision::Upgrade { location } => {
            log::info!("{} {} -> [upgrade] {}", req.method(), req.uri(), location);
            redirect(StatusCode::MOVED_PERMANENTLY, &location)
        }
        Decision::MethodNotAllowed => {
            log::info!("{} {} -> [method not allowed]", req.method(), req.uri());
            let mut resp = text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
            resp.headers_mut()
                .typed_insert(iter::once(Method::GET).collect::<Allow>());
            resp
        }
        Decision::NotFound => {
            log::info!(
                "{} {} -> [outside {}]",
                req.method(),
                req.uri(),
                record.import_path
            );
            not_found()
        }
        Decision::Documentation { location } => {
            log::info!("{} {} -> [docs] {}", req.method(), req.uri(), location);
            redirect(StatusCode::TEMPORARY_REDIRECT, &location)
        }
        Decision::Metadata(record) => match render::go_import(record) {
            Ok(html) => {
                log::info!(
                    "{} {} -> [go-import {} {} {}]",
                    req.method(),
                    req.uri(),
                    record.import_path,
                    record.vcs,
                    record.repo_root
                );
                let mut resp = Response::new(body::full(html));
                resp.headers_mut().insert(CONTENT_TYPE, TEXT_HTML_UTF_8);
                resp.headers_mut().typed_insert(
                    CacheControl::new()
                        .with_public()
                        .with_max_age(state.settings.max_age),
                );
                resp
            }
            Err(e) => {
                log::error!("{} {} -> [render error] {}", req.method(), req.uri(), e);
                server_error(e)
            }
        },
    }
}

fn text(status: StatusCode, msg: impl Display) -> Response<ResponseBody> {
    let mut resp = Response::new(body::full(format!("{}\n", msg)));
    *resp.status_mut() = status;
    resp.headers_mut().typed_insert(ContentType::text_utf8());
    resp
}

fn not_found() -> Response<ResponseBody> {
    text(StatusCode::NOT_FOUND, "package not found")
}

fn server_error(e: impl Display) -> Response<ResponseBody> {
    text(
        StatusCode::INTERNAL_SERVER_ERROR,
        format_args!("error performing request: {}", e),
    )
}

fn redirect(status: StatusCode, location: &str) -> Response<ResponseBody> {
    let value = match HeaderValue::try_from(location) {
        Ok(value) => value,
        Err(e) => return server_error(format_args!("invalid location {:?}: {}", location, e)),
    };
    let mut resp = Response::new(body::full(format!(
        "<a href=\"{}\">{}</a>.\n",
        render::escape(location),
        status.canonical_reason().unwrap_or_default()
    )));
    *resp.status_mut() = status;
    resp.headers_mut().insert(LOCATION, value);
    resp.headers_mut().insert(CONTENT_TYPE, TEXT_HTML_UTF_8);
    resp
}
