//! In-memory gallery state.
//!
//! The gallery is a local copy of the backend's works and categories. It is
//! brought up to date by `refresh` and patched in place after a successful
//! add or delete; nothing pushes server changes into it.

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::Session;
use crate::models::{Category, NewWork, Work, MAX_IMAGE_BYTES};

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    works: Vec<Work>,
    categories: Vec<Category>,
}

impl Gallery {
    pub fn new(works: Vec<Work>, categories: Vec<Category>) -> Self {
        Self { works, categories }
    }

    /// Refetch works and categories, replacing the local copy.
    /// On failure the previous contents are kept.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let (works, categories) =
            futures::try_join!(client.fetch_works(), client.fetch_categories())?;
        debug!(works = works.len(), categories = categories.len(), "Gallery refreshed");
        self.works = works;
        self.categories = categories;
        Ok(())
    }

    pub fn works(&self) -> &[Work] {
        &self.works
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: i64) -> Option<&Work> {
        self.works.iter().find(|w| w.id == id)
    }

    /// Works in the given category; `None` means all of them
    pub fn filter_by_category(&self, category_id: Option<i64>) -> Vec<&Work> {
        match category_id {
            Some(id) => self.works.iter().filter(|w| w.category_id == id).collect(),
            None => self.works.iter().collect(),
        }
    }

    pub fn category_name(&self, category_id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name.as_str())
    }

    /// Display name for a work's category, falling back to the embedded one
    pub fn category_name_for<'a>(&'a self, work: &'a Work) -> Option<&'a str> {
        self.category_name(work.category_id)
            .or_else(|| work.embedded_category_name())
    }

    /// Upload a work and append it to the gallery.
    pub async fn add_work(
        &mut self,
        client: &ApiClient,
        session: &Session,
        new_work: &NewWork,
    ) -> Result<Work, ApiError> {
        if session.bearer()?.is_none() {
            return Err(ApiError::NotAuthenticated);
        }
        self.validate(new_work)?;

        match client.create_work(session, new_work).await? {
            Some(work) => {
                info!(id = work.id, title = %work.title, "Work added");
                self.works.push(work.clone());
                Ok(work)
            }
            None => Err(ApiError::NotCreated),
        }
    }

    fn validate(&self, new_work: &NewWork) -> Result<(), ApiError> {
        let size = new_work.image_len();
        if size > MAX_IMAGE_BYTES {
            return Err(ApiError::ImageTooLarge {
                size,
                max: MAX_IMAGE_BYTES,
            });
        }
        // Only checkable once categories have been loaded
        if !self.categories.is_empty() && self.category_name(new_work.category_id).is_none() {
            return Err(ApiError::UnknownCategory(new_work.category_id));
        }
        Ok(())
    }

    /// Delete a work on the backend, then drop it locally.
    /// The local copy is only touched when the backend confirms.
    pub async fn delete_work(
        &mut self,
        client: &ApiClient,
        session: &Session,
        id: i64,
    ) -> Result<(), ApiError> {
        let response = client.delete_work(session, id).await?;
        let status = response.status();

        if status.is_success() {
            self.works.retain(|w| w.id != id);
            info!(id = id, "Work deleted");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(id = id, status = %status, "Delete refused");
            Err(ApiError::from_status(status, &body))
        }
    }
}
