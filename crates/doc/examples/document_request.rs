use bytes::Bytes;
use http::{Method, Request, Response, StatusCode, header};
use http_body_util::{BodyExt, Full};
use micro_doc::body::ReplayBody;
use micro_doc::handler::{Decorator, DocDecorator, Handler, TracingSink, make_handler};
use micro_doc::schema::StaticSchema;
use micro_doc::{ExtractionPolicy, RequestDocumenter};
use std::error::Error;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const SCHEMA: &str = r#"{
    "name": { "description": "user name", "required": true },
    "age": { "description": "age in years", "default": "18" },
    "active": { "description": "whether the account is enabled" }
}"#;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let schema = match StaticSchema::from_json_str(SCHEMA) {
        Ok(schema) => schema,
        Err(e) => {
            error!(cause = %e, "invalid schema");
            return;
        }
    };

    let documenter = RequestDocumenter::builder()
        .schema(schema)
        .policy(ExtractionPolicy::Lenient)
        .hidden_header(header::AUTHORIZATION)
        .build();

    let handler = DocDecorator::new(documenter, TracingSink).decorate(make_handler(create_user));

    let requests = vec![
        request("application/x-www-form-urlencoded", "name=alice&age=30&active=true"),
        request("application/json", r#"{"name":"bob","age":41,"tags":["admin"]}"#),
        request("application/x-www-form-urlencoded", "name=carol&broken"),
    ];

    for req in requests {
        match handler.call(req).await {
            Ok(resp) => info!(status = %resp.status(), "request served"),
            Err(e) => error!(cause = %e, "request failed"),
        }
    }
}

fn request(content_type: &str, body: &'static str) -> Request<Full<Bytes>> {
    Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, content_type)
        .header(header::ACCEPT, "application/json")
        .header(header::AUTHORIZATION, "Bearer secret")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .expect("request should be valid")
}

async fn create_user(req: Request<ReplayBody>) -> Result<Response<String>, Box<dyn Error + Send + Sync>> {
    let received = req.into_body().collect().await?.to_bytes().len();

    let resp = Response::builder()
        .status(StatusCode::CREATED)
        .header(header::CONTENT_TYPE, "application/json")
        .body(format!(r#"{{"received":{received}}}"#))?;
    Ok(resp)
}
