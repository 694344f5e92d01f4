//! Store behavior against a real in-memory database.

use dindin_core::{
    is_sorted_by_name, CategoryColor, CategoryType, CreateCategoryInput, IconName,
    UpdateCategoryInput, UpdatePaymentMethodInput,
};
use dindin_db::{Database, DbConfig, DbError};
use dindin_state::{CategoryStore, PaymentMethodStore};

/// An initialized database with payment methods but no categories.
async fn ready_db() -> Database {
    let db = Database::new(DbConfig::in_memory().seed_sample_categories(false));
    db.initialize().await.unwrap();
    db
}

fn input(name: &str, color: CategoryColor) -> CreateCategoryInput {
    CreateCategoryInput::new(name, IconName::Star, color, CategoryType::Expense)
}

#[tokio::test]
async fn load_fills_items_and_clears_flags() {
    let store = CategoryStore::new(ready_db().await);

    assert_eq!(store.seed().await.unwrap(), 5);
    store.load().await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.items.len(), 5);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert!(is_sorted_by_name(&state.items));
}

#[tokio::test]
async fn items_stay_sorted_through_creates_and_updates() {
    let store = CategoryStore::new(ready_db().await);
    store.load().await.unwrap();

    let mercado = store.create(&input("Mercado", CategoryColor::Green)).await.unwrap();
    store.create(&input("Academia", CategoryColor::Red)).await.unwrap();
    store.create(&input("Viagem", CategoryColor::Blue)).await.unwrap();
    assert!(store.with_state(|s| is_sorted_by_name(&s.items)));

    store
        .update(&UpdateCategoryInput::new(&mercado.id).name("Zebra"))
        .await
        .unwrap();

    let names: Vec<String> = store.with_state(|s| s.items.iter().map(|c| c.name.clone()).collect());
    assert_eq!(names, vec!["Academia", "Viagem", "Zebra"]);
}

#[tokio::test]
async fn create_then_change_type_scenario() {
    let store = CategoryStore::new(ready_db().await);

    let created = store
        .create(&CreateCategoryInput::new(
            "Lazer",
            IconName::Gamepad2,
            CategoryColor::Purple,
            CategoryType::Expense,
        ))
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.category_type, CategoryType::Expense);
    assert_eq!(created.created_at, created.updated_at);

    let updated = store
        .update(&UpdateCategoryInput::new(&created.id).category_type(CategoryType::Income))
        .await
        .unwrap();
    assert_eq!(updated.category_type, CategoryType::Income);
    assert_eq!(updated.name, "Lazer");
    assert!(updated.updated_at > updated.created_at);

    // The cache holds exactly what the database returned
    assert_eq!(store.snapshot().items, vec![updated]);
}

#[tokio::test]
async fn failed_update_keeps_items_and_sets_error() {
    let store = CategoryStore::new(ready_db().await);
    store.create(&input("Casa", CategoryColor::Green)).await.unwrap();
    let before = store.snapshot().items;

    let err = store
        .update(&UpdateCategoryInput::new("missing").name("Nada"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    let state = store.snapshot();
    assert_eq!(state.items, before);
    assert_eq!(state.error.as_deref(), Some("Failed to update category"));

    store.clear_error();
    let state = store.snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state.items, before);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn invalid_create_shows_validation_message() {
    let store = CategoryStore::new(ready_db().await);

    let err = store.create(&input("   ", CategoryColor::Red)).await.unwrap_err();

    assert!(matches!(err, DbError::Validation(_)));
    assert_eq!(store.snapshot().error.as_deref(), Some("name is required"));
    assert!(store.snapshot().items.is_empty());
}

#[tokio::test]
async fn next_action_clears_previous_error() {
    let store = CategoryStore::new(ready_db().await);
    let _ = store.update(&UpdateCategoryInput::new("missing").name("X")).await;
    assert!(store.snapshot().error.is_some());

    store.create(&input("Casa", CategoryColor::Green)).await.unwrap();

    assert_eq!(store.snapshot().error, None);
}

#[tokio::test]
async fn load_failure_keeps_stale_items() {
    let db = ready_db().await;
    let store = CategoryStore::new(db.clone());
    store.create(&input("Casa", CategoryColor::Green)).await.unwrap();

    db.close().await;
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, DbError::NotInitialized));

    let state = store.snapshot();
    assert_eq!(state.items.len(), 1);
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Failed to load categories"));
}

#[tokio::test]
async fn delete_removes_and_tolerates_unknown_ids() {
    let store = CategoryStore::new(ready_db().await);
    let casa = store.create(&input("Casa", CategoryColor::Green)).await.unwrap();
    store.create(&input("Lazer", CategoryColor::Purple)).await.unwrap();

    store.delete(&casa.id).await.unwrap();
    store.delete(&casa.id).await.unwrap();
    store.delete("never-existed").await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "Lazer");
}

#[tokio::test]
async fn update_of_uncached_record_leaves_items_alone() {
    let db = ready_db().await;
    let created = db
        .categories()
        .create(&input("Saúde", CategoryColor::Pink))
        .await
        .unwrap();

    // Never loaded, so the cache is empty
    let store = CategoryStore::new(db);
    let updated = store
        .update(&UpdateCategoryInput::new(&created.id).color(CategoryColor::Rose))
        .await
        .unwrap();

    assert_eq!(updated.color, CategoryColor::Rose);
    assert!(store.snapshot().items.is_empty());
    assert_eq!(store.snapshot().error, None);

    store.load().await.unwrap();
    assert_eq!(store.snapshot().items, vec![updated]);
}

#[tokio::test]
async fn payment_method_update_before_load_leaves_items_alone() {
    let db = ready_db().await;
    let pix = db
        .payment_methods()
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|m| m.name == "Pix")
        .unwrap();

    let store = PaymentMethodStore::new(db);
    store
        .update(&UpdatePaymentMethodInput::new(&pix.id, false))
        .await
        .unwrap();

    assert!(store.snapshot().items.is_empty());
}

#[tokio::test]
async fn seed_reloads_and_skips_populated_tables() {
    let store = CategoryStore::new(ready_db().await);
    store.create(&input("Casa", CategoryColor::Green)).await.unwrap();

    assert_eq!(store.seed().await.unwrap(), 0);

    let state = store.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.error, None);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn payment_method_seed_fills_cache() {
    let store = PaymentMethodStore::new(ready_db().await);

    // initialize() already seeded the defaults
    assert_eq!(store.seed().await.unwrap(), 0);
    assert_eq!(store.snapshot().items.len(), 5);
}

#[tokio::test]
async fn seed_failure_sets_error() {
    let db = ready_db().await;
    let store = CategoryStore::new(db.clone());
    db.close().await;

    let err = store.seed().await.unwrap_err();

    assert!(matches!(err, DbError::NotInitialized));
    assert_eq!(store.snapshot().error.as_deref(), Some("Failed to seed categories"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_actions_from_clones_all_land() {
    let store = CategoryStore::new(ready_db().await);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create(&input(&format!("Categoria {}", i), CategoryColor::Teal))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let state = store.snapshot();
    assert_eq!(state.items.len(), 8);
    assert!(is_sorted_by_name(&state.items));

    // The cache agrees with a fresh load
    let cached = state.items;
    store.load().await.unwrap();
    assert_eq!(store.snapshot().items, cached);
}

#[tokio::test]
async fn payment_methods_load_and_toggle() {
    let store = PaymentMethodStore::new(ready_db().await);
    store.load().await.unwrap();
    assert_eq!(store.snapshot().items.len(), 5);
    assert_eq!(store.enabled().len(), 5);

    let dinheiro = store
        .with_state(|s| s.items.iter().find(|m| m.name == "Dinheiro").cloned())
        .unwrap();
    let updated = store
        .update(&UpdatePaymentMethodInput::new(&dinheiro.id, false))
        .await
        .unwrap();

    assert!(!updated.enabled);
    assert_eq!(store.enabled().len(), 4);
    assert!(store.with_state(|s| is_sorted_by_name(&s.items)));
}

#[tokio::test]
async fn payment_method_error_then_clear() {
    let store = PaymentMethodStore::new(ready_db().await);
    store.load().await.unwrap();

    let err = store
        .update(&UpdatePaymentMethodInput::new("missing", true))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Failed to update payment method")
    );
    assert_eq!(store.snapshot().items.len(), 5);

    store.clear_error();
    assert_eq!(store.snapshot().error, None);
}

#[tokio::test]
async fn file_database_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dindin.db");

    let db = Database::new(DbConfig::new(&path).seed_sample_categories(false));
    db.initialize().await.unwrap();
    let store = CategoryStore::new(db.clone());
    store.create(&input("Casa", CategoryColor::Green)).await.unwrap();
    db.close().await;

    let db = Database::new(DbConfig::new(&path).seed_sample_categories(false));
    db.initialize().await.unwrap();
    let store = CategoryStore::new(db);
    store.load().await.unwrap();

    let names: Vec<String> = store.with_state(|s| s.items.iter().map(|c| c.name.clone()).collect());
    assert_eq!(names, vec!["Casa"]);
}

#[tokio::test]
async fn fresh_install_shows_sample_categories() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("dindin.db")));
    db.initialize().await.unwrap();

    let store = CategoryStore::new(db.clone());
    store.load().await.unwrap();

    let names: Vec<String> = store.with_state(|s| s.items.iter().map(|c| c.name.clone()).collect());
    assert_eq!(names, vec!["Alimentação", "Casa", "Lazer", "Saúde", "Transporte"]);
    db.close().await;
}
