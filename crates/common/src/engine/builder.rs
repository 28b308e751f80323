//! Constructors for protected requests and responses
//!
//! Shorthands for building a message from scratch and protecting it in one
//! step, e.g. for a client preparing a signed JSON request.

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode, Uri};
use serde::Serialize;

use super::{Engine, ProtectError};
use crate::crypto::{
    CryptoProvider, SealingPublicKey, SharedAuthenticationKey, SharedEncryptionKey,
    SigningSecretKey,
};

fn new_request(method: Method, uri: Uri) -> Request<Bytes> {
    let mut request = Request::new(Bytes::new());
    *request.method_mut() = method;
    *request.uri_mut() = uri;
    request
}

fn new_response(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status;
    response
}

macro_rules! message_builders {
    (
        $key:ty, $protect:ident, $protect_json:ident,
        $request:ident, $json_request:ident, $response:ident, $json_response:ident
    ) => {
        impl<P: CryptoProvider> Engine<P> {
            #[doc = concat!("Build a request with a raw body and apply `", stringify!($protect), "`")]
            pub fn $request(
                &self,
                method: Method,
                uri: Uri,
                body: impl Into<Bytes>,
                key: &$key,
            ) -> Result<Request<Bytes>, ProtectError> {
                let request = new_request(method, uri);
                self.$protect(request.map(|_| body.into()), key)
            }

            #[doc = concat!("Build a request with a JSON body and apply `", stringify!($protect_json), "`")]
            pub fn $json_request<T: Serialize + ?Sized>(
                &self,
                method: Method,
                uri: Uri,
                value: &T,
                key: &$key,
            ) -> Result<Request<Bytes>, ProtectError> {
                self.$protect_json(new_request(method, uri), value, key)
            }

            #[doc = concat!("Build a response with a raw body and apply `", stringify!($protect), "`")]
            pub fn $response(
                &self,
                status: StatusCode,
                body: impl Into<Bytes>,
                key: &$key,
            ) -> Result<Response<Bytes>, ProtectError> {
                let response = new_response(status);
                self.$protect(response.map(|_| body.into()), key)
            }

            #[doc = concat!("Build a response with a JSON body and apply `", stringify!($protect_json), "`")]
            pub fn $json_response<T: Serialize + ?Sized>(
                &self,
                status: StatusCode,
                value: &T,
                key: &$key,
            ) -> Result<Response<Bytes>, ProtectError> {
                self.$protect_json(new_response(status), value, key)
            }
        }
    };
}

message_builders!(
    SharedAuthenticationKey,
    authenticate,
    authenticate_json,
    create_authenticated_request,
    create_authenticated_json_request,
    create_authenticated_response,
    create_authenticated_json_response
);

message_builders!(
    SigningSecretKey,
    sign,
    sign_json,
    create_signed_request,
    create_signed_json_request,
    create_signed_response,
    create_signed_json_response
);

message_builders!(
    SealingPublicKey,
    seal,
    seal_json,
    create_sealed_request,
    create_sealed_json_request,
    create_sealed_response,
    create_sealed_json_response
);

message_builders!(
    SharedEncryptionKey,
    encrypt,
    encrypt_json,
    create_encrypted_request,
    create_encrypted_json_request,
    create_encrypted_response,
    create_encrypted_json_response
);
