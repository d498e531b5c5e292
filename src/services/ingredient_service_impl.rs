//! `SeaORM` implementation of the `IngredientService` trait.

use async_trait::async_trait;
use sea_orm::Set;
use tracing::info;

use crate::db::Store;
use crate::db::repositories::ingredient::IngredientRepository;
use crate::entities::ingredients;
use crate::models::{IngredientCreate, IngredientEdit, IngredientOut, Page};
use crate::services::error::messages;
use crate::services::{IngredientService, ServiceError};

pub struct SeaOrmIngredientService {
    store: Store,
}

impl SeaOrmIngredientService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IngredientService for SeaOrmIngredientService {
    async fn get_ingredient(&self, id: i32) -> Result<IngredientOut, ServiceError> {
        let txn = self.store.begin().await?;
        let ingredient = IngredientRepository::new(&txn)
            .get_by_id(id)
            .await?
            .ok_or_else(ServiceError::ingredient_not_found)?;
        txn.commit().await?;
        Ok(ingredient.into())
    }

    async fn search_ingredients(&self, pattern: &str) -> Result<Vec<IngredientOut>, ServiceError> {
        let txn = self.store.begin().await?;
        let found = IngredientRepository::new(&txn)
            .search_by_name(pattern)
            .await?;
        txn.commit().await?;
        Ok(found.into_iter().map(IngredientOut::from).collect())
    }

    async fn list_ingredients(&self, page: Page) -> Result<Vec<IngredientOut>, ServiceError> {
        let txn = self.store.begin().await?;
        let rows = IngredientRepository::new(&txn)
            .list(page.offset, page.limit)
            .await?;
        txn.commit().await?;
        Ok(rows.into_iter().map(IngredientOut::from).collect())
    }

    async fn create_ingredient(
        &self,
        payload: IngredientCreate,
    ) -> Result<IngredientOut, ServiceError> {
        let (_permit, txn) = self.store.begin_write().await?;
        let repo = IngredientRepository::new(&txn);

        if repo.name_taken(&payload.name, None).await? {
            return Err(ServiceError::conflict(messages::INGREDIENT_NAME_TAKEN));
        }

        let ingredient = repo
            .insert(payload.name, payload.alias)
            .await
            .map_err(|e| ServiceError::from_write(e, messages::INGREDIENT_NAME_TAKEN))?;
        txn.commit().await?;

        info!(ingredient_id = ingredient.id, name = %ingredient.name, "Created ingredient");
        Ok(ingredient.into())
    }

    async fn edit_ingredient(
        &self,
        id: i32,
        payload: IngredientEdit,
    ) -> Result<IngredientOut, ServiceError> {
        let name = payload.name.required("name")?;
        let alias = payload.alias.nullable();

        let (_permit, txn) = self.store.begin_write().await?;
        let repo = IngredientRepository::new(&txn);
        let current = repo
            .get_by_id(id)
            .await?
            .ok_or_else(ServiceError::ingredient_not_found)?;

        let mut active: ingredients::ActiveModel = current.clone().into();
        if let Some(name) = name {
            if repo.name_taken(&name, Some(id)).await? {
                return Err(ServiceError::conflict(messages::INGREDIENT_NAME_TAKEN));
            }
            active.name = Set(name);
        }
        if let Some(alias) = alias {
            active.alias = Set(alias);
        }

        let ingredient = repo
            .update(current, active)
            .await
            .map_err(|e| ServiceError::from_write(e, messages::INGREDIENT_NAME_TAKEN))?;
        txn.commit().await?;

        info!(ingredient_id = id, "Updated ingredient");
        Ok(ingredient.into())
    }

    async fn delete_ingredient(&self, id: i32) -> Result<IngredientOut, ServiceError> {
        let (_permit, txn) = self.store.begin_write().await?;
        let repo = IngredientRepository::new(&txn);
        let ingredient = repo
            .get_by_id(id)
            .await?
            .ok_or_else(ServiceError::ingredient_not_found)?;

        let detached = repo.detach_from_meals(id).await?;
        repo.delete(id).await?;
        txn.commit().await?;

        info!(ingredient_id = id, detached, "Deleted ingredient");
        Ok(ingredient.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::Patch;
    use crate::services::test_support::{file_store, test_store};

    fn flour() -> IngredientCreate {
        IngredientCreate {
            name: "Flour".to_string(),
            alias: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let service = SeaOrmIngredientService::new(test_store().await);
        service.create_ingredient(flour()).await.unwrap();

        let err = service.create_ingredient(flour()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Conflict(ref m) if m == "Ingredient with this name already exists"
        ));
        assert_eq!(service.list_ingredients(Page::default()).await.unwrap().len(), 1);
    }

    async fn create_concurrently(
        service: &Arc<SeaOrmIngredientService>,
        names: Vec<String>,
    ) -> Vec<Result<IngredientOut, ServiceError>> {
        let handles: Vec<_> = names
            .into_iter()
            .map(|name| {
                let service = Arc::clone(service);
                tokio::spawn(async move {
                    service
                        .create_ingredient(IngredientCreate { name, alias: None })
                        .await
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_name_creates_yield_one_winner() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(SeaOrmIngredientService::new(file_store(&dir).await));

        for round in 0..10 {
            let name = format!("Salt {round}");
            let results = create_concurrently(&service, vec![name; 5]).await;

            let created = results.iter().filter(|r| r.is_ok()).count();
            let conflicts = results
                .iter()
                .filter(|r| matches!(r, Err(ServiceError::Conflict(_))))
                .count();
            assert_eq!((created, conflicts), (1, 4), "round {round}: {results:?}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_distinct_creates_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(SeaOrmIngredientService::new(file_store(&dir).await));

        for round in 0..10 {
            let names = (0..5).map(|i| format!("Spice {round}-{i}")).collect();
            let results = create_concurrently(&service, names).await;
            assert!(results.iter().all(Result::is_ok), "round {round}: {results:?}");
        }

        let all = service
            .list_ingredients(Page::new(0, 1000))
            .await
            .unwrap();
        assert_eq!(all.len(), 50);
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let service = SeaOrmIngredientService::new(test_store().await);
        let created = service.create_ingredient(flour()).await.unwrap();

        let edited = service
            .edit_ingredient(
                created.id,
                IngredientEdit {
                    name: Patch::Value("Flour".to_string()),
                    alias: Patch::Value("Mehl".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.alias.as_deref(), Some("Mehl"));

        let cleared = service
            .edit_ingredient(
                created.id,
                IngredientEdit {
                    alias: Patch::Null,
                    ..IngredientEdit::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.alias, None);
        assert_eq!(cleared.name, "Flour");
    }

    #[tokio::test]
    async fn test_search_is_literal_and_case_sensitive() {
        let service = SeaOrmIngredientService::new(test_store().await);
        for name in ["Flour", "Rice flour", "100% Cocoa", "Sugar"] {
            service
                .create_ingredient(IngredientCreate {
                    name: name.to_string(),
                    alias: None,
                })
                .await
                .unwrap();
        }

        let names =
            |found: Vec<IngredientOut>| found.into_iter().map(|i| i.name).collect::<Vec<_>>();

        assert_eq!(
            names(service.search_ingredients("lour").await.unwrap()),
            ["Flour", "Rice flour"]
        );
        assert_eq!(names(service.search_ingredients("Flour").await.unwrap()), ["Flour"]);
        assert_eq!(names(service.search_ingredients("%").await.unwrap()), ["100% Cocoa"]);
        assert!(service.search_ingredients("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_pages_by_id() {
        let service = SeaOrmIngredientService::new(test_store().await);
        for name in ["A", "B", "C"] {
            service
                .create_ingredient(IngredientCreate {
                    name: name.to_string(),
                    alias: None,
                })
                .await
                .unwrap();
        }

        let page = service.list_ingredients(Page::new(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "B");
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let service = SeaOrmIngredientService::new(test_store().await);
        let err = service.delete_ingredient(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Ingredient not found"));
    }
}
