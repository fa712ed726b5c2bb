pub mod admin_product_handler;
pub mod product_handler;

pub use admin_product_handler::{
    __path_admin_create_product, __path_admin_delete_product, __path_admin_get_product,
    __path_admin_list_products, __path_admin_update_product, admin_create_product,
    admin_delete_product, admin_get_product, admin_list_products, admin_update_product,
};
pub use product_handler::{__path_get_product, __path_list_products, get_product, list_products};
