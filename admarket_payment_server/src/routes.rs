//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don’t block
//! execution:
//!
//! ```nocompile
//!     async fn my_handler() -> impl Responder {
//!         tokio::time::sleep(Duration::from_secs(5)).await; // <-- Ok. Worker thread will handle other requests here
//!     }
//! ```
use actix_web::{get, web, HttpResponse, Responder};
use admarket_payment_engine::{
    traits::{CatalogStore, PaymentStore},
    CatalogApi,
    PaymentFlowApi,
};
use log::*;
#[cfg(feature = "stripe")]
use stripe_tools::{CheckoutLine, StripeApi, StripeApiError};

#[cfg(feature = "stripe")]
use crate::data_objects::CheckoutRequest;
use crate::{
    data_objects::{VerifyPaymentRequest, VerifyPaymentResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
                impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

//----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//---------------------------------------   Crypto verification  ----------------------------------------------
route!(verify_crypto_payment => Post "/verify-crypto-payment" impl PaymentStore);
/// Route handler for the crypto payment verification endpoint.
///
/// `verify_crypto_payment` is a POST HTTP method. The checkout page posts the shopper's claim as
/// `{paymentId, txHash}` and receives the storefront envelope back:
/// `{success, message, payment?}`.
///
/// Failures carry the shopper-facing message verbatim and map onto the status codes the
/// storefront expects: 400 for correctable input (missing fields, malformed hash, lapsed
/// window), 404 for unknown records, and 500 when the store would not accept the completion.
pub async fn verify_crypto_payment<B: PaymentStore>(
    api: web::Data<PaymentFlowApi<B>>,
    body: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse, ServerError> {
    let VerifyPaymentRequest { payment_id, tx_hash } = body.into_inner();
    let payment_id = payment_id.unwrap_or_default();
    let tx_hash = tx_hash.unwrap_or_default();
    trace!("💻️ Verification claim received for payment [{payment_id}]");
    let verified = api.verify_payment(&payment_id, &tx_hash).await.map_err(|e| {
        debug!("💻️ Claim for payment [{payment_id}] was rejected. {e}");
        e
    })?;
    info!("💻️ Payment [{payment_id}] verified");
    Ok(HttpResponse::Ok().json(VerifyPaymentResponse::from(verified)))
}

//----------------------------------------------   Catalog  ---------------------------------------------------
route!(channels => Get "/channels" impl CatalogStore);
/// Route handler for the channel catalog. Serves the fixture set when the store is empty or
/// unreachable, so the response is always a non-empty JSON array.
pub async fn channels<B: CatalogStore>(api: web::Data<CatalogApi<B>>) -> HttpResponse {
    trace!("💻️ GET channels");
    HttpResponse::Ok().json(api.channels().await)
}

route!(products => Get "/products" impl CatalogStore);
pub async fn products<B: CatalogStore>(api: web::Data<CatalogApi<B>>) -> HttpResponse {
    trace!("💻️ GET products");
    HttpResponse::Ok().json(api.products().await)
}

route!(packages => Get "/packages" impl CatalogStore);
pub async fn packages<B: CatalogStore>(api: web::Data<CatalogApi<B>>) -> HttpResponse {
    trace!("💻️ GET packages");
    HttpResponse::Ok().json(api.packages().await)
}

//--------------------------------------------   Card checkout  -----------------------------------------------
#[cfg(feature = "stripe")]
route!(checkout => Post "/checkout");
/// Route handler for the card checkout endpoint.
///
/// `checkout` is a POST HTTP method taking the cart and the page origin. The cart lines are
/// reduced to catalog references and add-on flags before they leave the server; the response is
/// the vetted hosted-checkout session `{url, session_id?}`.
///
/// Cart validation failures return 400 with the shopper-facing message. Anything that goes wrong
/// between this server and the checkout workflow returns 502.
#[cfg(feature = "stripe")]
pub async fn checkout(
    api: web::Data<StripeApi>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, ServerError> {
    let CheckoutRequest { items, origin } = body.into_inner();
    info!("💻️ Card checkout requested for {} cart line(s)", items.len());
    let lines = items
        .iter()
        .map(|item| CheckoutLine { reference_id: item.reference_id.clone(), extras: item.extras.clone() })
        .collect::<Vec<_>>();
    let session = api.create_checkout_session(&lines, &origin).await.map_err(|e| match e {
        StripeApiError::Validation(e) => {
            debug!("💻️ The cart was rejected. {e}");
            ServerError::CheckoutValidation(e.to_string())
        },
        e => {
            warn!("💻️ Could not create a checkout session. {e}");
            ServerError::CheckoutUpstream(e.to_string())
        },
    })?;
    Ok(HttpResponse::Ok().json(session))
}
