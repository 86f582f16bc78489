pub mod title_lookup_reqwest;
