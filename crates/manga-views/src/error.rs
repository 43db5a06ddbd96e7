use thiserror::Error;

use manga_core::messages;

/// First failing rule of a form. Displays as the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", messages::FILL_ALL_FIELDS)]
    MissingFields,

    #[error("{}", messages::INVALID_EMAIL)]
    InvalidEmail,

    #[error("{}", messages::PASSWORD_TOO_SHORT)]
    PasswordTooShort,

    #[error("{}", messages::PASSWORDS_DIFFER)]
    PasswordsDiffer,

    #[error("{}", messages::USERNAME_TOO_SHORT)]
    UsernameTooShort,

    #[error("{}", messages::TITLE_REQUIRED)]
    TitleRequired,

    #[error("{}", messages::DESCRIPTION_REQUIRED)]
    DescriptionRequired,

    #[error("{}", messages::COVER_REQUIRED)]
    CoverRequired,

    #[error("{}", messages::CHAPTER_REQUIRED)]
    ChapterRequired,

    #[error("Capítulo {0} precisa ter pelo menos uma página")]
    ChapterWithoutPages(u32),

    #[error("{}", messages::IMAGES_ONLY)]
    NotAnImage,
}
