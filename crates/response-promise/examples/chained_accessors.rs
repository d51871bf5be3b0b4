use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;
use response_promise::{Failure, Handlers, Response, ResponsePromise, make_response_promise};
use std::time::Duration;

use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

type Settled = Result<Response<Bytes>, Failure<Bytes>>;

/// A pretend client, answering after a short delay.
fn get(path: &'static str) -> ResponsePromise<BoxFuture<'static, Settled>> {
    let source = async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        match path {
            "/hello" => Ok(Response::new()
                .with_entity(Bytes::from_static(b"Hello World!"))
                .with_status_text(200, "OK")
                .with_header("Content-Type", "text/plain; charset=utf-8")),
            _ => Err(Failure::from(
                Response::new().with_entity(Bytes::from_static(b"no such page")).with_status_text(404, "Not Found"),
            )),
        }
    };
    make_response_promise(source.boxed())
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let hello = get("/hello").shared();

    let (entity, status, content_type) =
        futures::join!(hello.clone().entity(), hello.clone().status(), hello.header("content-type"));
    info!(?entity, ?status, ?content_type, "fetched /hello");

    match get("/nope").entity().await {
        Ok(entity) => info!(?entity, "fetched /nope"),
        Err(entity) => warn!(?entity, "/nope rejected"),
    }

    let code = get("/nope")
        .status_with(Handlers::new().on_rejected(|code: Option<u16>| Ok::<_, ()>(code)))
        .await;
    info!(?code, "status of /nope, recovered from rejection");
}
