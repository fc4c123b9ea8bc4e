use rest_json::{ClientOptions, RestClient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
struct Todo {
    id: u64,
    title: String,
    completed: bool,
}

#[derive(Serialize)]
struct NewTodo<'a> {
    title: &'a str,
    completed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rest_json=debug".into()),
        )
        .init();

    let base_url = std::env::var("REST_JSON_DEMO_URL")
        .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com".to_owned());
    let client = RestClient::new(ClientOptions {
        log_enabled: true,
        ..ClientOptions::from_env().map_err(anyhow::Error::msg)?
    })?;

    let mut todo = Todo::default();
    client
        .request()
        .header("Accept", "application/json")
        .result(&mut todo)
        .get(&format!("{base_url}/todos/1"))
        .await?;
    println!("{todo:?}");

    let mut created = Todo::default();
    client
        .post_for_json_with_response_object(
            &format!("{base_url}/todos"),
            None,
            &NewTodo {
                title: "write docs",
                completed: false,
            },
            &mut created,
        )
        .await?;
    println!("{created:?}");

    Ok(())
}
