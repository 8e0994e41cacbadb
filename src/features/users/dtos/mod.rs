mod user_dto;

pub use user_dto::{
    ChangeRoleDto, LoginDto, RegisterUserDto, SessionResponseDto, UpdateProfileDto,
    UserResponseDto,
};
