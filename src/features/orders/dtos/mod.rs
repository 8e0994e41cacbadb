mod order_dto;

pub use order_dto::{OrderItemResponseDto, OrderLineDto, OrderResponseDto, PlaceOrderDto};
