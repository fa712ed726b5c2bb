mod category_dto;

pub use category_dto::{
    AdminCategoryQueryParams, CategoryDto, CreateCategoryDto, DeleteCategoryResponseDto,
    UpdateCategoryDto,
};
