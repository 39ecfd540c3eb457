use log::info;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::item::{Item, ItemUpdate, NewItem};
use crate::domain::ports::ItemRepository;

pub struct ItemService<R> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn save_item(&self, item: NewItem) -> Result<Uuid, DomainError> {
        item.validate()?;
        let id = self.repo.create(item)?;
        info!("Saved item {}", id);
        Ok(id)
    }

    pub fn find_items(&self) -> Result<Vec<Item>, DomainError> {
        self.repo.find_all()
    }

    pub fn update_item(&self, id: Uuid, update: ItemUpdate) -> Result<Item, DomainError> {
        update.validate()?;
        if !self.repo.update(id, update)? {
            return Err(DomainError::NotFound("Item"));
        }
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Item"))
    }
}
