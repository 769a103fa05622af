pub mod octopus;
pub mod page_fetcher;
