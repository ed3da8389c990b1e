use mongodb::Client;
use mongodb::bson::doc;

/// Run `{ ping: 1 }` against the `admin` database.
///
/// Used both to verify a fresh connection and by readiness probes.
pub async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}
