/// Bootstrap data
///
/// Inserts one admin and one regular user, each with a todo holding a single
/// item. Running it again reuses existing users and todos by name.

use anyhow::Context;
use taskboard_shared::{
    models::{
        todo::{CreateTodo, Todo},
        todo_item::CreateTodoItem,
        user::{CreateUser, User},
        Role,
    },
    store::Store,
};

struct SeedAccount {
    username: &'static str,
    password: &'static str,
    role: Role,
    todo: &'static str,
    item: &'static str,
}

const ACCOUNTS: [SeedAccount; 2] = [
    SeedAccount {
        username: "admin",
        password: "admin123",
        role: Role::Admin,
        todo: "Admin Todo",
        item: "Admin Item",
    },
    SeedAccount {
        username: "user",
        password: "user123",
        role: Role::User,
        todo: "User Todo",
        item: "User Item",
    },
];

/// Seeds the default accounts and todos
///
/// # Errors
///
/// Returns an error if password hashing fails.
pub async fn seed_default_data(store: &Store) -> anyhow::Result<()> {
    for account in &ACCOUNTS {
        let user = ensure_user(store, account).await?;
        let todo = ensure_todo(store, &user, account).await?;

        store
            .todos
            .recompute_completion(todo.id, store.items.as_ref())
            .await
            .with_context(|| format!("recomputing seeded todo {}", todo.id))?;
    }

    tracing::info!(
        users = store.users.count().await,
        todos = store.todos.count().await,
        "default data seeded"
    );
    Ok(())
}

async fn ensure_user(store: &Store, account: &SeedAccount) -> anyhow::Result<User> {
    match store.users.get_by_username(account.username).await {
        Ok(user) => Ok(user),
        Err(e) if e.is_not_found() => store
            .users
            .create(CreateUser {
                username: account.username.to_string(),
                password: account.password.to_string(),
                role: account.role,
            })
            .await
            .with_context(|| format!("creating seed user {}", account.username)),
        Err(e) => Err(e.into()),
    }
}

async fn ensure_todo(store: &Store, user: &User, account: &SeedAccount) -> anyhow::Result<Todo> {
    let existing = store
        .todos
        .get_by_owner(user.id)
        .await
        .into_iter()
        .find(|todo| todo.title == account.todo);
    if let Some(todo) = existing {
        return Ok(todo);
    }

    let todo = store
        .todos
        .create(CreateTodo {
            title: account.todo.to_string(),
            description: format!("Default todo for {}", account.username),
            user_id: user.id,
        })
        .await;

    store
        .items
        .create(CreateTodoItem {
            title: account.item.to_string(),
            description: format!("Default item for {}", account.username),
            completed: false,
            todo_id: todo.id,
            user_id: user.id,
        })
        .await;

    Ok(todo)
}
