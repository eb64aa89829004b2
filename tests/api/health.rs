use crate::helpers::{messages::Category, test_app::TestApp};

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/health", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!("healthy".to_string(), response.text().await.unwrap());
}

#[tokio::test]
async fn categories_are_listed_in_display_order() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/categories", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let categories: Vec<Category> = response.json().await.unwrap();
    let ids: Vec<&str> = categories.iter().map(|category| category.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["animals", "food", "school", "fruits", "places", "sports"]
    );
    assert_eq!(categories[0].name, "동물 친구들");
}

#[tokio::test]
async fn metrics_are_exposed() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/metrics", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
}
