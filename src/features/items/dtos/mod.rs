mod item_dto;

pub use item_dto::{CreateItemDto, ItemChanges, ItemQueryParams, ItemResponseDto, UpdateItemDto};
