mod caching_fetcher_decorator;

pub use caching_fetcher_decorator::CachingFetcherDecorator;
