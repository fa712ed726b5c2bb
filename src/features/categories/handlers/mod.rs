pub mod admin_category_handler;
pub mod category_handler;

pub use admin_category_handler::{
    __path_admin_create_category, __path_admin_delete_category, __path_admin_get_category,
    __path_admin_list_categories, __path_admin_update_category, admin_create_category,
    admin_delete_category, admin_get_category, admin_list_categories, admin_update_category,
};
pub use category_handler::{__path_get_category, __path_list_categories, get_category, list_categories};
