//! People API Example
//!
//! Demonstrates the fluent restpath client against a people directory.

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::time::Duration;

use restpath::prelude::*;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Data Types
// ============================================================================

/// A person of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
}

/// A phone number of a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// Typed facade over the fluent client
// ============================================================================

/// People directory client.
#[derive(Debug, Clone)]
pub struct PeopleApi {
    client: RestClient<HyperClient>,
}

impl PeopleApi {
    pub fn connect(endpoint: &str) -> Result<Self> {
        let client = connect(endpoint, Some(Duration::from_secs(10)))?;
        Ok(Self { client })
    }

    pub async fn person(&self, id: u64) -> Result<Person> {
        decode(self.client.get.at("people").call(id).await?)
    }

    pub async fn phones(&self, id: u64, kind: Option<&str>) -> Result<Vec<Phone>> {
        let mut options = QueryOptions::new();
        if let Some(kind) = kind {
            options.insert("type", kind);
        }
        decode(path!(self.client.list, people[id].phones).call(options).await?)
    }

    pub async fn add_person(&self, name: &str) -> Result<u64> {
        let id = (&self.client.create / "people")
            .call(json!({ "name": name }))
            .await?;
        decode(id)
    }

    pub async fn rename(&self, id: u64, name: &str) -> Result<()> {
        path!(self.client.update, people[id])
            .call(json!({ "name": name }))
            .await
    }

    pub async fn remove_person(&self, id: u64) -> Result<()> {
        self.client.remove.at("people").call(id).await
    }

    pub async fn age(&self, id: u64) -> Result<u32> {
        decode(path!(self.client.invoke, people[id].age).call(()).await?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("restpath=debug")),
        )
        .init();

    let endpoint =
        std::env::var("PEOPLE_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let api = PeopleApi::connect(&endpoint)?;

    tracing::info!(%endpoint, "people API client created");

    match api.person(1).await {
        Ok(person) => println!("person 1: {person:?}"),
        Err(err) => println!("person 1 unavailable: {err}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path, query_param},
    };

    #[tokio::test]
    async fn test_person() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/people/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Ada"})))
            .mount(&mock_server)
            .await;

        let api = PeopleApi::connect(&mock_server.uri()).expect("client");
        let person = api.person(1).await.expect("person");

        assert_eq!(
            person,
            Person {
                id: 1,
                name: "Ada".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_phones_with_filter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/people/1/phones"))
            .and(query_param("type", "mobile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"number": "555-0100", "type": "mobile"}])),
            )
            .mount(&mock_server)
            .await;

        let api = PeopleApi::connect(&mock_server.uri()).expect("client");
        let phones = api.phones(1, Some("mobile")).await.expect("phones");

        assert_eq!(phones.len(), 1);
        let phone = phones.first().expect("first phone");
        assert_eq!(phone.number, "555-0100");
        assert_eq!(phone.kind, "mobile");
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/people"))
            .and(body_json(json!({"name": "Grace"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2})))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/people/2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let api = PeopleApi::connect(&mock_server.uri()).expect("client");
        let id = api.add_person("Grace").await.expect("id");
        assert_eq!(id, 2);

        api.remove_person(id).await.expect("removed");
    }

    #[tokio::test]
    async fn test_rename_and_age() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/people/1"))
            .and(body_json(json!({"name": "Ada Lovelace"})))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/people/1/age"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 36})))
            .mount(&mock_server)
            .await;

        let api = PeopleApi::connect(&mock_server.uri()).expect("client");
        api.rename(1, "Ada Lovelace").await.expect("renamed");
        assert_eq!(api.age(1).await.expect("age"), 36);
    }

    #[tokio::test]
    async fn test_typed_decoding_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/people/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "one"})))
            .mount(&mock_server)
            .await;

        let api = PeopleApi::connect(&mock_server.uri()).expect("client");
        let err = api.person(1).await.expect_err("bad shape");

        assert_eq!(err.code(), ErrorCode::ResponseError);
        assert_eq!(err.info().get("path"), Some(&json!("id")));
    }
}
