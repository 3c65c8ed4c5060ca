/// Console state machine
///
/// A [`Console`] owns the loaded products, the current error message and the
/// current route. [`Console::mount`] performs the single fetch the dashboard
/// makes when it is opened; [`Console::logout`] ends the session locally.

use crate::client::ProductApi;
use crate::storage::TokenStore;
use crate::view::DashboardView;
use catalog_shared::models::product::Product;
use chrono::NaiveDate;
use std::io;

pub const NO_TOKEN_MESSAGE: &str = "No token found. Please log in.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Status that ends the session
const SESSION_REJECTED_STATUS: u16 = 403;

/// Where the console currently points the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
}

pub struct Console<S, A> {
    tokens: S,
    api: A,
    products: Vec<Product>,
    error: Option<String>,
    route: Route,
}

impl<S: TokenStore, A: ProductApi> Console<S, A> {
    pub fn new(tokens: S, api: A) -> Self {
        Self {
            tokens,
            api,
            products: Vec::new(),
            error: None,
            route: Route::Dashboard,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Loads the caller's products
    ///
    /// Without a stored token no request is made and the console routes to
    /// login. A rejected session (403) also routes to login; any other
    /// failure keeps the dashboard with an error message.
    pub async fn mount(&mut self) {
        let Some(token) = self.tokens.get() else {
            tracing::info!("No stored token, redirecting to login");
            self.error = Some(NO_TOKEN_MESSAGE.to_string());
            self.route = Route::Login;
            return;
        };

        match self.api.list_products(&token).await {
            Ok(products) => {
                tracing::info!(count = products.len(), "Products loaded");
                self.products = products;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load products");
                self.error = Some(
                    e.server_message()
                        .filter(|m| !m.is_empty())
                        .unwrap_or(FETCH_FAILED_MESSAGE)
                        .to_string(),
                );

                if e.status() == Some(SESSION_REJECTED_STATUS) {
                    self.route = Route::Login;
                }
            }
        }
    }

    /// Forgets the stored token and routes to login
    pub fn logout(&mut self) -> io::Result<()> {
        self.tokens.clear()?;
        self.route = Route::Login;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn view(&self, today: NaiveDate) -> DashboardView {
        DashboardView::build(&self.products, self.error.as_deref(), today)
    }
}
