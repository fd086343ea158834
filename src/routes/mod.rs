pub mod edd;
