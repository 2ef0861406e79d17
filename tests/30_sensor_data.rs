mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn reading_crud_lifecycle() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping: database unavailable");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let token = common::register_and_login(&client, &server.base_url, "datacrud").await?;
    let sensor_id = common::create_sensor(&client, &server.base_url, &token, "Greenhouse").await?;

    let collection = format!("{}/sensors/{}/data", server.base_url, sensor_id);

    // Record a measurement
    let res = client
        .post(&collection)
        .bearer_auth(&token)
        .json(&json!({
            "ph": 6.4,
            "airHumidity": 71.5,
            "soilHumidity": 38.0,
            "soilNutrients": "NPK 12-8-10",
            "temperature": 24.3
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    let data_id = body["data"]["sensorDataId"].as_i64().unwrap();
    assert_eq!(body["data"]["ph"], 6.4);
    // Fields left out of the payload are simply null
    assert!(body["data"]["shadingIndex"].is_null());

    // Listed under its sensor
    let res = client.get(&collection).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Fetch one
    let item = format!("{}/{}", collection, data_id);
    let res = client.get(&item).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Replace the fields
    let res = client
        .put(&item)
        .bearer_auth(&token)
        .json(&json!({ "ph": 6.9, "temperature": 25.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["ph"], 6.9);
    // A full-replace update nulls out everything not sent
    assert!(body["data"]["airHumidity"].is_null());

    // Delete, then gone
    let res = client.delete(&item).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let res = client.get(&item).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn reading_unreachable_through_wrong_sensor() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping: database unavailable");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let token = common::register_and_login(&client, &server.base_url, "crosssensor").await?;

    // Two sensors, both owned by the same user
    let first = common::create_sensor(&client, &server.base_url, &token, "First").await?;
    let second = common::create_sensor(&client, &server.base_url, &token, "Second").await?;

    let res = client
        .post(format!("{}/sensors/{}/data", server.base_url, first))
        .bearer_auth(&token)
        .json(&json!({ "temperature": 19.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    let data_id = body["data"]["sensorDataId"].as_i64().unwrap();

    // The same reading id addressed through the sibling sensor must 404
    let wrong = format!("{}/sensors/{}/data/{}", server.base_url, second, data_id);
    for res in [
        client.get(&wrong).bearer_auth(&token).send().await?,
        client
            .put(&wrong)
            .bearer_auth(&token)
            .json(&json!({ "temperature": 99.0 }))
            .send()
            .await?,
        client.delete(&wrong).bearer_auth(&token).send().await?,
    ] {
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    // Untouched through the right path
    let right = format!("{}/sensors/{}/data/{}", server.base_url, first, data_id);
    let res = client.get(&right).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["temperature"], 19.0);

    Ok(())
}

#[tokio::test]
async fn readings_hidden_from_non_owner() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping: database unavailable");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let owner = common::register_and_login(&client, &server.base_url, "dataowner").await?;
    let intruder = common::register_and_login(&client, &server.base_url, "dataintruder").await?;

    let sensor_id = common::create_sensor(&client, &server.base_url, &owner, "Hidden").await?;
    let collection = format!("{}/sensors/{}/data", server.base_url, sensor_id);

    let res = client
        .post(&collection)
        .bearer_auth(&intruder)
        .json(&json!({ "ph": 7.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(&collection).bearer_auth(&intruder).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
