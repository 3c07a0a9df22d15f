use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        extensions::{ExtensionList, ExtensionPayload},
        products::{ProductList, UpdateProductRequest},
        transactions::{
            AdminTransaction, AdminTransactionList, CreateTransactionRequest, CreatedTransaction,
            ManualTransactionRequest, StatusUpdated, TransactionList,
            UpdateTransactionStatusRequest,
        },
        users::{UpdateProfileRequest, UpdateUserStatusRequest, UserList},
        vouchers::{
            CreateVoucherRequest, CreatedVoucher, PublicVoucher, PublicVoucherList,
            UpdateVoucherRequest, ValidateVoucherRequest, ValidateVoucherResponse, VoucherList,
            VoucherSummary,
        },
    },
    models::{DiscountType, Extension, Product, QuotaType, Transaction, TransactionStatus, User, Voucher},
    qris::QrisPayload,
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, health, params, products as product_routes, qris as qris_routes,
        transactions as transaction_routes, users as user_routes, vouchers as voucher_routes,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        product_routes::list_products,
        user_routes::update_profile,
        voucher_routes::list_vouchers,
        voucher_routes::validate_voucher,
        transaction_routes::create_transaction,
        transaction_routes::list_transactions,
        transaction_routes::confirm_payment,
        transaction_routes::confirm_whatsapp,
        qris_routes::generate,
        admin::list_users,
        admin::delete_user,
        admin::update_user_status,
        admin::list_products,
        admin::update_product,
        admin::list_transactions,
        admin::create_manual_transaction,
        admin::update_transaction_status,
        admin::delete_transaction,
        admin::list_vouchers,
        admin::create_voucher,
        admin::update_voucher,
        admin::delete_voucher,
        admin::list_extensions,
        admin::create_extension,
        admin::list_expiring_extensions,
        admin::list_expired_extensions,
        admin::update_extension,
        admin::delete_extension
    ),
    components(
        schemas(
            User,
            Product,
            Voucher,
            Transaction,
            Extension,
            TransactionStatus,
            DiscountType,
            QuotaType,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateProfileRequest,
            UpdateUserStatusRequest,
            UserList,
            UpdateProductRequest,
            ProductList,
            ValidateVoucherRequest,
            ValidateVoucherResponse,
            VoucherSummary,
            PublicVoucher,
            PublicVoucherList,
            CreateVoucherRequest,
            UpdateVoucherRequest,
            CreatedVoucher,
            VoucherList,
            CreateTransactionRequest,
            CreatedTransaction,
            TransactionList,
            AdminTransaction,
            AdminTransactionList,
            UpdateTransactionStatusRequest,
            StatusUpdated,
            ManualTransactionRequest,
            ExtensionPayload,
            ExtensionList,
            QrisPayload,
            qris_routes::GenerateQrisRequest,
            health::HealthData,
            params::Pagination,
            params::DaysWindowQuery,
            Meta,
            ApiResponse<User>,
            ApiResponse<AuthResponse>,
            ApiResponse<ProductList>,
            ApiResponse<PublicVoucherList>,
            ApiResponse<ValidateVoucherResponse>,
            ApiResponse<TransactionList>,
            ApiResponse<AdminTransactionList>,
            ApiResponse<ExtensionList>,
            ApiResponse<QrisPayload>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Profile endpoints"),
        (name = "Products", description = "Product catalog"),
        (name = "Vouchers", description = "Voucher lookup and validation"),
        (name = "Transactions", description = "Customer checkout and confirmations"),
        (name = "Qris", description = "QRIS payment code generation"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
