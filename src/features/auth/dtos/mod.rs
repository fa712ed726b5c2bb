pub mod auth_dto;

pub use auth_dto::{LoginRequestDto, MeResponseDto, RefreshTokenRequestDto, RefreshTokenResponseDto, TokenPairDto};
