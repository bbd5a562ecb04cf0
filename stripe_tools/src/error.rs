use thiserror::Error;

/// The cart was rejected before anything left the process. These messages are shown to the
/// shopper as-is, so they are written in the storefront's language.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutValidationError {
    #[error("Корзина пуста")]
    EmptyCart,
    #[error("Максимум 50 товаров в заказе")]
    TooManyItems,
    #[error("Нет валидных товаров для оплаты")]
    NoValidItems,
}

/// The webhook call itself went wrong. The displayed messages are fixed shopper-facing strings;
/// the interesting detail goes to the logs at the call site.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutServerError {
    #[error("Ошибка создания платежа")]
    SessionRejected { status: u16 },
    #[error("URL оплаты не получен")]
    MissingPaymentUrl,
    #[error("Некорректный URL оплаты")]
    SuspiciousPaymentUrl,
    #[error("Превышено время ожидания")]
    Timeout,
    #[error("Ошибка соединения с сервером оплаты")]
    Connection(String),
}

#[derive(Debug, Error)]
pub enum StripeApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("{0}")]
    Validation(#[from] CheckoutValidationError),
    #[error("{0}")]
    Server(#[from] CheckoutServerError),
}
