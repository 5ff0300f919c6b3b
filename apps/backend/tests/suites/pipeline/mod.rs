pub mod cookies;
pub mod domain_redirect;
pub mod routing;
pub mod startup;
