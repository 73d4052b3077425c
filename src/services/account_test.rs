use super::*;
use std::sync::Mutex;
use time::OffsetDateTime;

// =========================================================================
// MockStore
// =========================================================================

/// Scripted store: each operation pops its next queued result, falling back
/// to a benign default when the queue runs dry.
#[derive(Default)]
struct MockStore {
    get_results: Mutex<Vec<Result<Account, StoreError>>>,
    insert_results: Mutex<Vec<Result<i64, StoreError>>>,
    update_results: Mutex<Vec<Result<(), StoreError>>>,
    delete_results: Mutex<Vec<Result<(), StoreError>>>,
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl AccountStore for MockStore {
    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        self.calls.lock().unwrap().push(format!("get({id})"));
        let mut results = self.get_results.lock().unwrap();
        if results.is_empty() {
            Err(StoreError::NotFound(id))
        } else {
            results.remove(0)
        }
    }

    async fn insert_account(&self, request: &AccountCreationRequest) -> Result<i64, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("insert(org_id={:?})", request.org_id));
        let mut results = self.insert_results.lock().unwrap();
        if results.is_empty() { Ok(1) } else { results.remove(0) }
    }

    async fn update_account(&self, id: i64, _request: &AccountUpdateRequest) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(format!("update({id})"));
        let mut results = self.update_results.lock().unwrap();
        if results.is_empty() { Ok(()) } else { results.remove(0) }
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(format!("delete({id})"));
        let mut results = self.delete_results.lock().unwrap();
        if results.is_empty() { Ok(()) } else { results.remove(0) }
    }
}

fn dummy_account(id: i64) -> Account {
    Account {
        id,
        name: "acc1".into(),
        account_type: "savings".into(),
        account_sub_type: String::new(),
        org_id: 1,
        current_balance: 24.0,
        is_deleted: false,
        created_ts: OffsetDateTime::UNIX_EPOCH,
        updated_ts: OffsetDateTime::UNIX_EPOCH,
    }
}

// =========================================================================
// get_account
// =========================================================================

#[tokio::test]
async fn get_account_returns_stored_account() {
    let store = MockStore::default();
    store.get_results.lock().unwrap().push(Ok(dummy_account(1)));
    let service = AccountsService::new(Arc::new(store));

    let account = service.get_account(1).await.unwrap();
    assert_eq!(account.id, 1);
    assert_eq!(account.name, "acc1");
    assert_eq!(account.account_type, "savings");
    assert_eq!(account.account_sub_type, "");
    assert!((account.current_balance - 24.0).abs() < f64::EPSILON);
    assert!(!account.is_deleted);
}

#[tokio::test]
async fn get_account_wraps_not_found_with_id() {
    let service = AccountsService::new(Arc::new(MockStore::default()));

    let err = service.get_account(7).await.unwrap_err();
    assert!(matches!(err, AccountError::Retrieve { id: 7, .. }));
    assert_eq!(
        err.to_string(),
        "failed to retrieve account of id 7 with err:non-existent account with id 7"
    );
}

#[tokio::test]
async fn get_account_wraps_database_error_with_id() {
    let store = MockStore::default();
    store
        .get_results
        .lock()
        .unwrap()
        .push(Err(StoreError::Database(sqlx::Error::PoolTimedOut)));
    let service = AccountsService::new(Arc::new(store));

    let err = service.get_account(3).await.unwrap_err();
    assert!(matches!(err.store_cause(), StoreError::Database(_)));
    assert!(err.to_string().starts_with("failed to retrieve account of id 3 with err:"));
}

// =========================================================================
// create_account
// =========================================================================

#[tokio::test]
async fn create_account_forwards_request_and_discards_id() {
    let store = Arc::new(MockStore::default());
    store.insert_results.lock().unwrap().push(Ok(42));
    let service = AccountsService::new(store.clone());

    let request = AccountCreationRequest { org_id: Some(1), ..Default::default() };
    service.create_account(&request).await.unwrap();

    let calls = store.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], "insert(org_id=Some(1))");
}

#[tokio::test]
async fn create_account_propagates_missing_org_id_unmodified() {
    let store = MockStore::default();
    store
        .insert_results
        .lock()
        .unwrap()
        .push(Err(StoreError::MissingField("org_id")));
    let service = AccountsService::new(Arc::new(store));

    let err = service.create_account(&AccountCreationRequest::default()).await.unwrap_err();
    assert!(matches!(err, AccountError::Store(StoreError::MissingField("org_id"))));
    assert_eq!(err.to_string(), "missing required field: org_id");
}

// =========================================================================
// update_account / delete_account
// =========================================================================

#[tokio::test]
async fn update_account_propagates_not_found_unmodified() {
    let store = MockStore::default();
    store.update_results.lock().unwrap().push(Err(StoreError::NotFound(9)));
    let service = AccountsService::new(Arc::new(store));

    let err = service
        .update_account(9, &AccountUpdateRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "non-existent account with id 9");
}

#[tokio::test]
async fn delete_account_is_idempotent_observable() {
    let store = MockStore::default();
    {
        let mut deletes = store.delete_results.lock().unwrap();
        deletes.push(Ok(()));
        deletes.push(Err(StoreError::NotFound(5)));
    }
    let service = AccountsService::new(Arc::new(store));

    service.delete_account(5).await.unwrap();
    let err = service.delete_account(5).await.unwrap_err();
    assert!(err.to_string().contains('5'));
}

// =========================================================================
// Wire types
// =========================================================================

#[test]
fn creation_request_absent_fields_deserialize_to_none() {
    let request: AccountCreationRequest =
        serde_json::from_str(r#"{"name":"acc1","org_id":1}"#).unwrap();
    assert_eq!(request.name.as_deref(), Some("acc1"));
    assert_eq!(request.org_id, Some(1));
    assert!(request.account_type.is_none());
    assert!(request.account_sub_type.is_none());
    assert!(request.current_balance.is_none());
}

#[test]
fn update_request_distinguishes_absent_from_empty() {
    let request: AccountUpdateRequest =
        serde_json::from_str(r#"{"account_sub_type":""}"#).unwrap();
    assert_eq!(request.account_sub_type.as_deref(), Some(""));
    assert!(request.name.is_none());
}

#[test]
fn account_serializes_wire_field_names() {
    let json = serde_json::to_value(dummy_account(1)).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["account_type"], "savings");
    assert_eq!(json["account_sub_type"], "");
    assert_eq!(json["org_id"], 1);
    assert_eq!(json["is_deleted"], false);
    assert_eq!(json["created_ts"], "1970-01-01T00:00:00Z");
}
