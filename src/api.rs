//! Remote marketplace API
//!
//! The request and response shapes the client exchanges with the
//! BidNet service, and the checks every form runs before anything is
//! sent. Transport is somebody else's job; nothing here does I/O.
use crate::auction::{self, Amount, InvalidArgument, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const PROFILE_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    SignIn,
    SignUp,
    ForgotPassword,
    ResetPassword { reset_token: String },
    Logout,
    Product { product_id: ProductId },
    CreateProduct,
    UpdateProduct { product_id: ProductId },
    UpcomingAuctions,
    Leaderboard,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        use Endpoint::*;
        match self {
            Product { .. } | UpcomingAuctions | Leaderboard => Method::Get,
            UpdateProduct { .. } => Method::Patch,
            SignIn | SignUp | ForgotPassword | ResetPassword { .. } | Logout | CreateProduct => {
                Method::Post
            }
        }
    }

    /// Path relative to the API base
    pub fn path(&self) -> String {
        use Endpoint::*;
        match self {
            SignIn => "/auth/sign-in".to_owned(),
            SignUp => "/auth/sign-up".to_owned(),
            ForgotPassword => "/auth/forgot-password".to_owned(),
            ResetPassword { reset_token } => format!("/auth/reset-password/{reset_token}"),
            Logout => "/auth/logout".to_owned(),
            Product { product_id } | UpdateProduct { product_id } => {
                format!("/products/{product_id}")
            }
            CreateProduct => "/products".to_owned(),
            UpcomingAuctions => "/auctions/upcoming".to_owned(),
            Leaderboard => "/leaderboard".to_owned(),
        }
    }

    /// Whether the body goes out as `multipart/form-data` rather than JSON
    pub fn is_multipart(&self) -> bool {
        matches!(
            self,
            Endpoint::SignUp | Endpoint::CreateProduct | Endpoint::UpdateProduct { .. }
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least {} characters long", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("passwords must match")]
    PasswordMismatch,
    #[error("please add at least one interest")]
    NoInterests,
    #[error("interest cannot be empty")]
    EmptyInterest,
    #[error("unsupported file format: {0}")]
    UnsupportedImageType(String),
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] InvalidArgument),
}

/// A payload that can be checked before it leaves the client
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Loose `local@domain.tld` shape check, the same strictness as the
/// forms have always had
fn check_email(email: &str) -> Result<(), ValidationError> {
    require("email", email)?;
    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    let valid = !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .rsplit_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
            .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

fn check_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

/// Text fields of a multipart body, in the order they are appended
pub type FormFields = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

impl Validate for SignIn {
    fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)?;
        require("password", &self.password)
    }
}

/// A file picked in a form; only its metadata matters to validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub roles: String,
    pub personal_interests: Vec<String>,
    pub profile_image: Option<Upload>,
}

impl SignUp {
    pub fn form_fields(&self) -> FormFields {
        let mut fields = vec![
            ("name".to_owned(), self.name.clone()),
            ("email".to_owned(), self.email.clone()),
            ("password".to_owned(), self.password.clone()),
            ("confirmPassword".to_owned(), self.confirm_password.clone()),
        ];
        fields.extend(
            self.personal_interests
                .iter()
                .map(|i| ("personalInterests[]".to_owned(), i.clone())),
        );
        fields.push(("roles".to_owned(), self.roles.clone()));
        fields
    }
}

impl Validate for SignUp {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        check_email(&self.email)?;
        require("password", &self.password)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        require("password confirmation", &self.confirm_password)?;
        check_confirmation(&self.password, &self.confirm_password)?;
        require("role", &self.roles)?;
        if self.personal_interests.is_empty() {
            return Err(ValidationError::NoInterests);
        }
        if self.personal_interests.iter().any(|i| i.trim().is_empty()) {
            return Err(ValidationError::EmptyInterest);
        }
        let image = self
            .profile_image
            .as_ref()
            .ok_or(ValidationError::Required("profile image"))?;
        if !PROFILE_IMAGE_TYPES.contains(&image.content_type.as_str()) {
            return Err(ValidationError::UnsupportedImageType(
                image.content_type.clone(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPassword {
    pub email: String,
}

impl Validate for ForgotPassword {
    fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)
    }
}

/// The reset form; only `new_password` is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub reset_token: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    pub new_password: String,
}

impl ResetPasswordForm {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::ResetPassword {
            reset_token: self.reset_token.clone(),
        }
    }

    pub fn body(&self) -> ResetPassword {
        ResetPassword {
            new_password: self.password.clone(),
        }
    }
}

impl Validate for ResetPasswordForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("reset token", &self.reset_token)?;
        require("password", &self.password)?;
        require("password confirmation", &self.confirm_password)?;
        check_confirmation(&self.password, &self.confirm_password)
    }
}

/// Add/edit form of the listing dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: Amount,
    pub featured: bool,
    pub image: Option<Upload>,
}

impl ProductForm {
    /// Create or update, depending on whether the product already exists
    pub fn endpoint(product_id: Option<&str>) -> Endpoint {
        match product_id {
            Some(id) => Endpoint::UpdateProduct {
                product_id: id.to_owned(),
            },
            None => Endpoint::CreateProduct,
        }
    }

    /// Pre-fill the form from an existing listing
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            featured: product.featured,
            image: None,
        }
    }

    pub fn form_fields(&self) -> FormFields {
        vec![
            ("name".to_owned(), self.name.clone()),
            ("price".to_owned(), self.price.to_string()),
            ("featured".to_owned(), self.featured.to_string()),
        ]
    }
}

impl Validate for ProductForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        auction::check_price(self.price)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Amount,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: Option<String>,
}

/// `GET /products/{id}` wraps the product in `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEnvelope {
    pub data: Product,
}

/// Mutations answer with a human readable message, errors included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub bids_count: u64,
}
