use bytes::Bytes;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use response_promise::{
    Failure, Handlers, HeaderValues, Response, ResponsePromise, ResponsePromiseExt, make_response_promise,
};
use std::io;

type Settled = Result<Response<Bytes>, Failure<Bytes>>;

/// Stands in for a client: answers `/missing` with a 404 rejection, `/offline`
/// with a transport failure and everything else with a json document.
async fn exchange(path: &'static str) -> Settled {
    tokio::task::yield_now().await;
    let http_response = match path {
        "/offline" => return Err(Failure::transport(io::Error::other("connection refused"))),
        "/missing" => http::Response::builder()
            .status(http::StatusCode::NOT_FOUND)
            .header("content-type", "text/plain")
            .body(Bytes::from_static(b"not found")),
        _ => http::Response::builder()
            .status(http::StatusCode::OK)
            .header("content-type", "application/json")
            .header("cache-control", "no-cache")
            .header("cache-control", "no-store")
            .body(Bytes::from_static(b"{\"ok\":true}")),
    }
    .map_err(Failure::transport)?;

    let response = Response::from(http_response);
    if response.status_code().is_some_and(|code| code >= 400) {
        return Err(Failure::from(response));
    }
    Ok(response)
}

fn fetch(path: &'static str) -> ResponsePromise<BoxFuture<'static, Settled>> {
    make_response_promise(exchange(path).boxed())
}

#[tokio::test]
async fn entity_of_successful_exchange() {
    assert_eq!(fetch("/items").entity().await.unwrap(), Some(Bytes::from_static(b"{\"ok\":true}")));
}

#[tokio::test]
async fn status_of_failed_exchange_rejects_with_code() {
    assert_eq!(fetch("/missing").status().await, Err(Some(404)));
    assert_eq!(fetch("/missing").entity().await, Err(Some(Bytes::from_static(b"not found"))));
}

#[tokio::test]
async fn transport_failure_rejects_with_none() {
    assert_eq!(fetch("/offline").entity().await, Err(None));
    assert_eq!(fetch("/offline").status().await, Err(None));
    assert!(fetch("/offline").headers().await.unwrap_err().is_none());
    assert_eq!(fetch("/offline").header("content-type").await, Err(None));
}

#[tokio::test]
async fn repeated_header_keeps_every_value() {
    let cache_control = fetch("/items").header("Cache-Control").await.unwrap().unwrap();
    assert_eq!(cache_control.iter().collect::<Vec<_>>(), vec!["no-cache", "no-store"]);
}

#[tokio::test]
async fn rejection_handler_turns_404_into_default() {
    let handlers = Handlers::new()
        .on_fulfilled(|entity: Option<Bytes>| Ok::<_, Option<Bytes>>(entity.unwrap_or_default()))
        .on_rejected(|entity: Option<Bytes>| match entity {
            Some(_) => Ok(Bytes::from_static(b"{}")),
            None => Err(None),
        });

    assert_eq!(fetch("/missing").entity_with(handlers.clone()).await, Ok(Bytes::from_static(b"{}")));
    assert_eq!(fetch("/offline").entity_with(handlers).await, Err(None));
}

#[tokio::test]
async fn shared_source_serves_every_accessor() {
    let promise = fetch("/items").shared();

    let (status, content_type, headers, settled) = futures::join!(
        promise.clone().status(),
        promise.clone().header("CONTENT-TYPE"),
        promise.clone().headers(),
        promise.clone().into_inner(),
    );

    assert_eq!(status, Ok(Some(200)));
    assert_eq!(content_type, Ok(Some(HeaderValues::from("application/json"))));
    assert_eq!(headers.unwrap().unwrap().len(), 2);
    assert!(settled.is_ok());
}

#[tokio::test]
async fn awaiting_the_promise_yields_whole_response() {
    let response = fetch("/items").await.unwrap();
    assert_eq!(response.status_code(), Some(200));

    let nullable = future::ready(Ok::<Option<Response<()>>, Option<Response<()>>>(None)).into_response_promise();
    assert_eq!(nullable.status().await, Ok(None));
}
