pub mod google_cse;
