mod common;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

fn precio(product: &Value) -> Decimal {
    Decimal::from_str(product["precio"].as_str().expect("precio is a string")).unwrap()
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_is_empty_on_a_fresh_store() {
    let app = common::spawn_app().await;

    let response = app.get("").await;
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["count"], 0);
    assert_eq!(body["message"], "Productos obtenidos exitosamente");
}

#[tokio::test]
async fn list_returns_newest_first_with_count() {
    let app = common::spawn_app().await;
    let created = app.seed().await;

    let body: Value = app.get("").await.json().await.unwrap();

    let mut expected = created.clone();
    expected.reverse();
    assert_eq!(ids(&body["data"]), expected);
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn trailing_slash_reaches_the_same_route() {
    let app = common::spawn_app().await;
    app.seed().await;

    let response = app.get("/").await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn list_filters_combine() {
    let app = common::spawn_app().await;
    app.seed().await;

    let body: Value = app.get("?categoria=bebidas").await.json().await.unwrap();
    assert_eq!(body["count"], 2);

    let body: Value = app
        .get("?categoria=Bebidas&precio_max=5")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["nombre"], "Té verde");

    let body: Value = app
        .get("?precio_min=3&precio_max=12.5")
        .await
        .json()
        .await
        .unwrap();
    let mut nombres: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    nombres.sort();
    assert_eq!(nombres, vec!["Café molido", "Galletas", "Té verde"]);

    let body: Value = app.get("?nombre=GALL").await.json().await.unwrap();
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn blank_filters_are_ignored() {
    let app = common::spawn_app().await;
    app.seed().await;

    let body: Value = app
        .get("?categoria=&nombre=%20&precio_min=")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn non_numeric_price_filter_is_rejected() {
    let app = common::spawn_app().await;

    let response = app.get("?precio_min=barato").await;
    assert_eq!(400, response.status().as_u16());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn create_returns_201_with_defaults() {
    let app = common::spawn_app().await;

    let response = app
        .post(&json!({"nombre": "Azúcar", "precio": "2.30", "descripcion": "  "}))
        .await;
    assert_eq!(201, response.status().as_u16());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Producto creado exitosamente");
    assert!(body.get("count").is_none());

    let product = &body["data"];
    assert_eq!(product["nombre"], "Azúcar");
    assert_eq!(precio(product), Decimal::from_str("2.30").unwrap());
    assert_eq!(product["stock"], 0);
    assert_eq!(product["activo"], true);
    assert_eq!(product["descripcion"], Value::Null);
    assert!(product["fecha_creacion"].is_string());
    assert!(product["fecha_actualizacion"].is_string());
}

#[tokio::test]
async fn create_rejects_invalid_fields_without_storing() {
    let app = common::spawn_app().await;

    let cases = [
        (json!({"precio": 10}), "El nombre es obligatorio"),
        (json!({"nombre": "Sal"}), "El precio es obligatorio"),
        (json!({"nombre": "Sal", "precio": 0}), "El precio debe ser un número mayor que 0"),
        (json!({"nombre": "Sal", "precio": "gratis"}), "El precio debe ser un número mayor que 0"),
        (
            json!({"nombre": "Sal", "precio": 1, "stock": -1}),
            "El stock debe ser un número entero no negativo",
        ),
        (
            json!({"nombre": "Sal", "precio": 1, "imagen_url": "no es una url"}),
            "La URL de la imagen no es válida",
        ),
    ];

    for (body, expected) in cases {
        let response = app.post(&body).await;
        assert_eq!(400, response.status().as_u16(), "payload {}", body);

        let envelope: Value = response.json().await.unwrap();
        assert_eq!(envelope["success"], false);
        let message = envelope["message"].as_str().unwrap();
        assert!(
            message.contains(expected),
            "{:?} does not mention {:?}",
            message,
            expected
        );
    }

    assert_eq!(app.store.row_count().await, 0);
}

#[tokio::test]
async fn create_reports_every_failing_field() {
    let app = common::spawn_app().await;

    let body: Value = app.post(&json!({})).await.json().await.unwrap();
    let message = body["message"].as_str().unwrap();

    assert!(message.contains("El nombre es obligatorio"));
    assert!(message.contains("El precio es obligatorio"));
}

#[tokio::test]
async fn malformed_json_is_a_400_envelope() {
    let app = common::spawn_app().await;

    let response = app
        .client
        .post(app.productos_url(""))
        .header("Content-Type", "application/json")
        .body("{\"nombre\": ")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
    assert!(body["message"].as_str().unwrap().starts_with("JSON inválido"));
}

#[tokio::test]
async fn get_by_id() {
    let app = common::spawn_app().await;
    let created = app.seed().await;

    let response = app.get(&format!("/{}", created[2])).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["nombre"], "Galletas");
    assert_eq!(body["message"], "Producto obtenido exitosamente");

    let response = app.get("/9999").await;
    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Producto no encontrado");

    let response = app.get("/abc").await;
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "ID de producto inválido");
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = common::spawn_app().await;
    let id = app
        .create(json!({"nombre": "Leche", "precio": 1.1, "categoria": "Lácteos", "stock": 6}))
        .await;
    let before: Value = app.get(&format!("/{}", id)).await.json().await.unwrap();

    let response = app.put(&id.to_string(), &json!({"stock": 0})).await;
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Producto actualizado exitosamente");
    let after = &body["data"];
    assert_eq!(after["stock"], 0);
    assert_eq!(after["nombre"], before["data"]["nombre"]);
    assert_eq!(after["categoria"], before["data"]["categoria"]);
    assert_eq!(precio(after), precio(&before["data"]));
    assert_eq!(after["fecha_creacion"], before["data"]["fecha_creacion"]);
    assert!(timestamp(&after["fecha_actualizacion"]) >= timestamp(&before["data"]["fecha_actualizacion"]));
}

#[tokio::test]
async fn update_validation_and_missing_rows() {
    let app = common::spawn_app().await;
    let id = app.create(json!({"nombre": "Arroz", "precio": 3})).await;

    let response = app.put(&id.to_string(), &json!({})).await;
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Debe proporcionar al menos un campo para actualizar"
    );

    let response = app.put(&id.to_string(), &json!({"precio": -1})).await;
    assert_eq!(400, response.status().as_u16());

    let response = app.put("9999", &json!({"stock": 1})).await;
    assert_eq!(404, response.status().as_u16());

    let response = app.put("x1", &json!({"stock": 1})).await;
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn delete_is_soft_and_hides_the_product() {
    let app = common::spawn_app().await;
    let created = app.seed().await;
    let target = created[0];

    let response = app.delete(&target.to_string()).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Producto eliminado exitosamente");
    assert_eq!(body["data"]["activo"], false);

    assert_eq!(404, app.get(&format!("/{}", target)).await.status().as_u16());
    assert_eq!(404, app.delete(&target.to_string()).await.status().as_u16());
    assert_eq!(
        404,
        app.put(&target.to_string(), &json!({"stock": 1}))
            .await
            .status()
            .as_u16()
    );

    let list: Value = app.get("").await.json().await.unwrap();
    assert!(!ids(&list["data"]).contains(&target));
    assert_eq!(list["count"], 3);

    let stored = app
        .store
        .fetch_including_inactive(target as i32)
        .await
        .expect("row is kept");
    assert!(!stored.activo);
    assert_eq!(app.store.row_count().await, 4);
}

#[tokio::test]
async fn categories_are_distinct_sorted_and_active_only() {
    let app = common::spawn_app().await;
    let created = app.seed().await;
    app.create(json!({"nombre": "Lápiz", "precio": 1, "categoria": ""}))
        .await;

    let body: Value = app.get("/categorias").await.json().await.unwrap();
    assert_eq!(body["data"], json!(["Bebidas", "Snacks"]));
    assert_eq!(body["count"], 2);
    assert_eq!(body["message"], "Categorías obtenidas exitosamente");

    app.delete(&created[2].to_string()).await;
    let body: Value = app.get("/categorias").await.json().await.unwrap();
    assert_eq!(body["data"], json!(["Bebidas"]));
}

#[tokio::test]
async fn whitespace_category_from_update_is_not_listed() {
    let app = common::spawn_app().await;
    let id = app
        .create(json!({"nombre": "Vela", "precio": 2, "categoria": "Hogar"}))
        .await;

    let response = app.put(&id.to_string(), &json!({"categoria": "   "})).await;
    assert_eq!(200, response.status().as_u16());

    let body: Value = app.get("/categorias").await.json().await.unwrap();
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn search_matches_name_description_and_category() {
    let app = common::spawn_app().await;
    app.seed().await;

    let response = app.get("/buscar/CAF").await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["message"], "Búsqueda completada para: CAF");

    let body: Value = app.get("/buscar/snack").await.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["nombre"], "Galletas");

    let body: Value = app.get("/buscar/zz").await.json().await.unwrap();
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn search_term_must_have_two_characters() {
    let app = common::spawn_app().await;

    let response = app.get("/buscar/a").await;
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "El término de búsqueda debe tener al menos 2 caracteres"
    );

    let response = app.get("/buscar/%20a%20").await;
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
    let app = common::spawn_app().await;
    app.seed().await;
    app.create(json!({"nombre": "Tornillo_M4", "precio": 1}))
        .await;

    let body: Value = app.get("/buscar/__").await.json().await.unwrap();
    assert_eq!(body["count"], 0);

    let body: Value = app.get("/buscar/o_m").await.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["nombre"], "Tornillo_M4");
}
