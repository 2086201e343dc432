//! Books repository port.

use async_trait::async_trait;
use bookshop::books::{Book, BookId};
use mockall::automock;

use crate::domain::RepositoryError;

/// Read access to books and their current prices.
#[automock]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    /// Look up a book and its current price.
    ///
    /// Returns `Ok(None)` when the book does not exist.
    async fn find_book(&self, book: &BookId) -> Result<Option<Book>, RepositoryError>;
}
