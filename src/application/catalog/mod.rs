mod catalog_service;

pub use catalog_service::{
    CatalogDependencies, get_book, get_library, list_libraries, list_library_books,
    update_book_condition, update_book_count,
};
