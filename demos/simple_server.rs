use std::env;
use vitrine::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Providers
    let themes = InMemoryThemes::new()
        .with_resource(
            ThemeType::Login,
            "base",
            "css/login.css",
            "body { font-family: sans-serif }",
        )
        .with_messages(
            ThemeType::Login,
            "base",
            "en",
            [("loginTitle", "Sign in to {0}"), ("noAccount", "Don''t have an account?")],
        );
    let realms =
        InMemoryRealms::new().with_overrides("master", "en", [("loginTitle", "Welcome to {0}")]);
    let encoding = GzipEncoding::new(env::temp_dir().join("vitrine-demo"));

    // Build App
    let app = VitrineServer::default().build(themes, realms, encoding);

    // Serve
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    println!("Server listening on http://{addr}");
    println!("  GET /resources/{RESOURCES_VERSION}/login/base/css/login.css");
    println!("  GET /resources/localizations?realm=master&themeType=login&themeName=base&locale=en");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
