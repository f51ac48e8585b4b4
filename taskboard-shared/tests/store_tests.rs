/// Integration tests for the in-memory repositories
///
/// Exercises id allocation, soft-delete views, username uniqueness and
/// completion recomputation through the public store API.

use taskboard_shared::auth::password::Argon2Hasher;
use taskboard_shared::error::StoreError;
use taskboard_shared::models::todo::{CreateTodo, Todo};
use taskboard_shared::models::todo_item::CreateTodoItem;
use taskboard_shared::models::user::{CreateUser, UpdateUser};
use taskboard_shared::models::{Id, Role};
use taskboard_shared::store::Store;

fn test_store() -> Store {
    Store::new(Argon2Hasher::with_params(8, 1, 1))
}

async fn recompute(store: &Store, todo_id: Id) -> Todo {
    store
        .todos
        .recompute_completion(todo_id, store.items.as_ref())
        .await
        .unwrap()
}

fn new_todo(title: &str, user_id: Id) -> CreateTodo {
    CreateTodo {
        title: title.to_string(),
        description: String::new(),
        user_id,
    }
}

fn new_item(title: &str, todo_id: Id, user_id: Id, completed: bool) -> CreateTodoItem {
    CreateTodoItem {
        title: title.to_string(),
        description: String::new(),
        completed,
        todo_id,
        user_id,
    }
}

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password: "password123".to_string(),
        role: Role::User,
    }
}

#[tokio::test]
async fn test_completion_follows_item_lifecycle() {
    let store = test_store();

    let user = store.users.create(new_user("u1")).await.unwrap();
    let todo = store.todos.create(new_todo("T1", user.id)).await;
    assert_eq!(todo.completion_pct, 0.0);

    let mut a = store
        .items
        .create(new_item("A", todo.id, user.id, false))
        .await;
    let todo = recompute(&store, todo.id).await;
    assert_eq!(todo.completion_pct, 0.0);

    a.completed = true;
    store.items.update(a).await.unwrap();
    let todo = recompute(&store, todo.id).await;
    assert_eq!(todo.completion_pct, 100.0);

    let b = store
        .items
        .create(new_item("B", todo.id, user.id, false))
        .await;
    let todo = recompute(&store, todo.id).await;
    assert_eq!(todo.completion_pct, 50.0);

    store.items.delete(b.id).await.unwrap();
    let todo = recompute(&store, todo.id).await;
    assert_eq!(todo.completion_pct, 100.0);

    // Stored value matches the returned one
    let stored = store.todos.get_by_id(todo.id).await.unwrap();
    assert_eq!(stored.completion_pct, 100.0);
}

#[tokio::test]
async fn test_completion_with_partial_progress() {
    let store = test_store();
    let todo = store.todos.create(new_todo("thirds", 1)).await;

    store.items.create(new_item("a", todo.id, 1, true)).await;
    store.items.create(new_item("b", todo.id, 1, false)).await;
    store.items.create(new_item("c", todo.id, 1, false)).await;

    let todo = recompute(&store, todo.id).await;
    assert!((todo.completion_pct - 100.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_completion_back_to_zero_when_all_items_deleted() {
    let store = test_store();
    let todo = store.todos.create(new_todo("T", 1)).await;
    let item = store.items.create(new_item("done", todo.id, 1, true)).await;

    let todo = recompute(&store, todo.id).await;
    assert_eq!(todo.completion_pct, 100.0);

    store.items.delete(item.id).await.unwrap();
    let todo = recompute(&store, todo.id).await;
    assert_eq!(todo.completion_pct, 0.0);
}

#[tokio::test]
async fn test_recompute_ignores_other_todos_items() {
    let store = test_store();
    let first = store.todos.create(new_todo("first", 1)).await;
    let second = store.todos.create(new_todo("second", 1)).await;

    store.items.create(new_item("x", first.id, 1, false)).await;
    store.items.create(new_item("y", second.id, 1, true)).await;

    let first = recompute(&store, first.id).await;
    let second = recompute(&store, second.id).await;
    assert_eq!(first.completion_pct, 0.0);
    assert_eq!(second.completion_pct, 100.0);
}

#[tokio::test]
async fn test_recompute_unknown_todo_is_not_found() {
    let store = test_store();
    let result = store
        .todos
        .recompute_completion(404, store.items.as_ref())
        .await;
    assert!(matches!(result, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_ids_are_monotonic_across_deletes() {
    let store = test_store();

    let t1 = store.todos.create(new_todo("1", 1)).await;
    let t2 = store.todos.create(new_todo("2", 1)).await;
    store.todos.delete(t2.id).await.unwrap();
    let t3 = store.todos.create(new_todo("3", 1)).await;
    assert!(t1.id < t2.id && t2.id < t3.id);

    let u1 = store.users.create(new_user("a")).await.unwrap();
    store.users.delete(u1.id).await.unwrap();
    let u2 = store.users.create(new_user("a")).await.unwrap();
    assert!(u2.id > u1.id);
}

#[tokio::test]
async fn test_soft_deleted_todo_visibility() {
    let store = test_store();
    let todo = store.todos.create(new_todo("gone", 7)).await;
    store.todos.delete(todo.id).await.unwrap();

    assert!(store
        .todos
        .get_by_id(todo.id)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(store.todos.get_by_owner(7).await.is_empty());
    assert!(store.todos.get_all().await.is_empty());

    let deleted = store
        .todos
        .get_by_id_including_deleted(todo.id)
        .await
        .unwrap();
    assert!(deleted.deleted_at.is_some());
    assert_eq!(store.todos.get_by_owner_including_deleted(7).await.len(), 1);
    assert_eq!(store.todos.get_all_including_deleted().await.len(), 1);
}

#[tokio::test]
async fn test_soft_deleted_item_visibility() {
    let store = test_store();
    let todo = store.todos.create(new_todo("T", 1)).await;
    let keep = store
        .items
        .create(new_item("keep", todo.id, 1, false))
        .await;
    let gone = store
        .items
        .create(new_item("gone", todo.id, 1, false))
        .await;
    store.items.delete(gone.id).await.unwrap();

    let live: Vec<Id> = store
        .items
        .get_by_parent(todo.id)
        .await
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(live, vec![keep.id]);
    assert_eq!(
        store
            .items
            .get_by_parent_including_deleted(todo.id)
            .await
            .len(),
        2
    );
    assert!(store.items.get_by_id(gone.id).await.is_err());
    assert!(store
        .items
        .get_by_id_including_deleted(gone.id)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_double_delete_is_rejected() {
    let store = test_store();
    let todo = store.todos.create(new_todo("T", 1)).await;
    let item = store.items.create(new_item("i", todo.id, 1, false)).await;

    store.items.delete(item.id).await.unwrap();
    assert!(matches!(
        store.items.delete(item.id).await,
        Err(StoreError::InvalidState(_))
    ));

    store.todos.delete(todo.id).await.unwrap();
    assert!(matches!(
        store.todos.delete(todo.id).await,
        Err(StoreError::InvalidState(_))
    ));

    assert!(store.todos.delete(999).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_update_of_deleted_todo_is_rejected() {
    let store = test_store();
    let todo = store.todos.create(new_todo("T", 1)).await;
    store.todos.delete(todo.id).await.unwrap();

    let mut edit = todo.clone();
    edit.title = "revived".to_string();
    assert!(matches!(
        store.todos.update(edit).await,
        Err(StoreError::InvalidState(_))
    ));

    let stored = store
        .todos
        .get_by_id_including_deleted(todo.id)
        .await
        .unwrap();
    assert_eq!(stored.title, "T");
    assert!(stored.deleted_at.is_some());
}

#[tokio::test]
async fn test_stale_todo_update_keeps_completion() {
    let store = test_store();
    let todo = store.todos.create(new_todo("T", 1)).await;
    let stale = todo.clone();

    store.items.create(new_item("done", todo.id, 1, true)).await;
    recompute(&store, todo.id).await;

    let mut edit = stale;
    edit.title = "renamed".to_string();
    edit.completion_pct = 0.0;
    let updated = store.todos.update(edit).await.unwrap();

    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.completion_pct, 100.0);
}

#[tokio::test]
async fn test_username_uniqueness() {
    let store = test_store();
    let alice = store.users.create(new_user("alice")).await.unwrap();

    assert!(matches!(
        store.users.create(new_user("alice")).await,
        Err(StoreError::DuplicateUsername(_))
    ));
    // Case-sensitive
    assert!(store.users.create(new_user("Alice")).await.is_ok());

    store.users.delete(alice.id).await.unwrap();
    assert!(store.users.create(new_user("alice")).await.is_ok());
}

#[tokio::test]
async fn test_user_rename_collision_leaves_user_unchanged() {
    let store = test_store();
    store.users.create(new_user("taken")).await.unwrap();
    let bob = store.users.create(new_user("bob")).await.unwrap();

    let result = store
        .users
        .update(
            bob.id,
            UpdateUser {
                username: "taken".to_string(),
                password: String::new(),
                role: None,
            },
        )
        .await;
    assert!(matches!(result, Err(StoreError::DuplicateUsername(_))));

    let stored = store.users.get_by_id(bob.id).await.unwrap();
    assert_eq!(stored.username, "bob");
    assert_eq!(stored.password_hash, bob.password_hash);
}

#[tokio::test]
async fn test_user_password_change() {
    let store = test_store();
    let user = store.users.create(new_user("carol")).await.unwrap();

    let kept = store
        .users
        .update(
            user.id,
            UpdateUser {
                username: "carol".to_string(),
                password: String::new(),
                role: None,
            },
        )
        .await
        .unwrap();
    assert!(store.users.check_password(&kept, "password123").unwrap());

    let changed = store
        .users
        .update(
            user.id,
            UpdateUser {
                username: "carol".to_string(),
                password: "new-password".to_string(),
                role: None,
            },
        )
        .await
        .unwrap();
    assert!(store
        .users
        .check_password(&changed, "new-password")
        .unwrap());
    assert!(!store
        .users
        .check_password(&changed, "password123")
        .unwrap());
}

#[tokio::test]
async fn test_user_delete_does_not_cascade() {
    let store = test_store();
    let user = store.users.create(new_user("dave")).await.unwrap();
    let todo = store.todos.create(new_todo("orphan", user.id)).await;

    store.users.delete(user.id).await.unwrap();

    assert!(store
        .users
        .get_by_id(user.id)
        .await
        .unwrap_err()
        .is_not_found());
    assert_eq!(store.todos.get_by_id(todo.id).await.unwrap().user_id, user.id);
    assert!(store
        .users
        .delete(user.id)
        .await
        .unwrap_err()
        .is_not_found());
}
