use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::menu::{dtos as menu_dtos, handlers as menu_handlers};
use crate::features::orders::{dtos as orders_dtos, handlers as orders_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        users_handlers::user_handler::register,
        users_handlers::user_handler::login,
        users_handlers::user_handler::whoami,
        users_handlers::user_handler::update_profile,
        users_handlers::user_handler::change_role,
        users_handlers::user_handler::delete_user,
        // Categories
        categories_handlers::category_handler::get_categories,
        categories_handlers::category_handler::create_category,
        // Menu items
        menu_handlers::menu_item_handler::create_menu_item,
        menu_handlers::menu_item_handler::update_menu_item,
        menu_handlers::menu_item_handler::delete_menu_item,
        // Orders
        orders_handlers::order_handler::place_order,
        orders_handlers::order_handler::cancel_order,
        orders_handlers::order_handler::list_my_orders,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Users
            users_models::CurrentUser,
            users_dtos::RegisterUserDto,
            users_dtos::LoginDto,
            users_dtos::UpdateProfileDto,
            users_dtos::ChangeRoleDto,
            users_dtos::UserResponseDto,
            users_dtos::SessionResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<users_dtos::SessionResponseDto>,
            ApiResponse<users_models::CurrentUser>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            // Menu items
            menu_dtos::CreateMenuItemDto,
            menu_dtos::UpdateMenuItemDto,
            menu_dtos::MenuItemResponseDto,
            ApiResponse<menu_dtos::MenuItemResponseDto>,
            // Orders
            orders_dtos::OrderLineDto,
            orders_dtos::PlaceOrderDto,
            orders_dtos::OrderItemResponseDto,
            orders_dtos::OrderResponseDto,
            ApiResponse<orders_dtos::OrderResponseDto>,
            ApiResponse<Vec<orders_dtos::OrderResponseDto>>,
        )
    ),
    tags(
        (name = "users", description = "Registration, login and profile management"),
        (name = "categories", description = "Menu category tree (public read)"),
        (name = "menu", description = "Menu item management (admin only)"),
        (name = "orders", description = "Order placement, cancellation and history"),
        (name = "admin", description = "Account administration (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Canteen API",
        version = "0.1.0",
        description = "API documentation for the canteen backend",
    )
)]
pub struct ApiDoc;

/// Adds the bearer session-token security scheme to the generated OpenAPI
/// document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
