use axum::{
    Router,
    middleware as axum_middleware,
};
use tower::ServiceBuilder;

#[tokio::main]
async fn main() -> Result<(), common_types_contact::E> {
    ::std::env::set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_target(false)
            .without_time()
            .init();

    let appstate = common_types_contact::State::make_state().await?;
    // API Gateway can map the function under any resource path
    let endpoint = common_types_contact::Routes::contact::endpoint();
    let router = Router::new()
                    .route("/", endpoint.clone())
                    .route("/*path", endpoint)
                    .route_layer(ServiceBuilder::new()
                                 .layer(axum_middleware::from_fn(common_types_contact::Middleware::request_describer::middleware))
                              )
                    .route_layer(axum_middleware::from_fn_with_state(appstate.clone(), common_types_contact::Middleware::set_cors_headers::middleware))
                    .with_state(appstate);

    lambda_web::run_hyper_on_lambda(router).await
}
