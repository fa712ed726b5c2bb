mod product_dto;

pub use product_dto::{
    AdminProductDto, AdminProductQueryParams, CreateProductDto, ProductDto, ProductQueryParams,
    UpdateProductDto,
};
