//! Protobuf and gRPC types for the Porage service.
//!
//! Vendored `tonic-build` output for `proto/porage.proto`, committed so that
//! building the crate does not require a system `protoc`. Regenerate with
//! `tonic-build` after editing the proto file.

#![allow(clippy::all)]

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Empty {}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct CreateLedgerRequest {
    #[prost(uint64, tag = "1")]
    pub ledger_id: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AppendEntryOnLedgerRequest {
    #[prost(uint64, tag = "1")]
    pub ledger_id: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AppendEntryOnLedgerResponse {
    #[prost(int64, tag = "1")]
    pub entry_id: i64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetEntryFromLedgerRequest {
    #[prost(uint64, tag = "1")]
    pub ledger_id: u64,
    #[prost(int64, tag = "2")]
    pub entry_id: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEntryFromLedgerResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeleteLedgerRequest {
    #[prost(uint64, tag = "1")]
    pub ledger_id: u64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct LedgerLengthRequest {
    #[prost(uint64, tag = "1")]
    pub ledger_id: u64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct LedgerLengthResponse {
    #[prost(int64, tag = "1")]
    pub length: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListLedgersResponse {
    #[prost(uint64, repeated, tag = "1")]
    pub ledger_ids: ::prost::alloc::vec::Vec<u64>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WorkerDescription {
    #[prost(string, tag = "1")]
    pub description: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListWorkersResponse {
    #[prost(map = "string, message", tag = "1")]
    pub workers: ::std::collections::HashMap<::prost::alloc::string::String, WorkerDescription>,
}
/// Generated client implementations.
pub mod porage_service_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::http::Uri;
    use tonic::codegen::*;
    /// Porage record store service.
    #[derive(Debug, Clone)]
    pub struct PorageServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl PorageServiceClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> PorageServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> PorageServiceClient<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T::ResponseBody: Default,
            T: tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::BoxBody>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
            >>::Error: Into<StdError> + Send + Sync,
        {
            PorageServiceClient::new(InterceptedService::new(inner, interceptor))
        }
        /// Compress requests with the given encoding.
        ///
        /// This requires the server to support it otherwise it might respond with an
        /// error.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.send_compressed(encoding);
            self
        }
        /// Enable decompressing responses.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.accept_compressed(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_decoding_message_size(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_encoding_message_size(limit);
            self
        }
        /// Creates a new ledger. Fails with ALREADY_EXISTS if the ledger is open.
        pub async fn create_ledger(
            &mut self,
            request: impl tonic::IntoRequest<super::CreateLedgerRequest>,
        ) -> std::result::Result<tonic::Response<super::Empty>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/porage.PorageService/CreateLedger",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("porage.PorageService", "CreateLedger"));
            self.inner.unary(req, path, codec).await
        }
        /// Appends an entry to a ledger, returning its assigned entry ID once the
        /// write is durably journaled.
        pub async fn append_entry_on_ledger(
            &mut self,
            request: impl tonic::IntoRequest<super::AppendEntryOnLedgerRequest>,
        ) -> std::result::Result<
            tonic::Response<super::AppendEntryOnLedgerResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/porage.PorageService/AppendEntryOnLedger",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("porage.PorageService", "AppendEntryOnLedger"));
            self.inner.unary(req, path, codec).await
        }
        /// Fetches the payload of one entry. Fails with NOT_FOUND for a missing
        /// ledger or entry.
        pub async fn get_entry_from_ledger(
            &mut self,
            request: impl tonic::IntoRequest<super::GetEntryFromLedgerRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetEntryFromLedgerResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/porage.PorageService/GetEntryFromLedger",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("porage.PorageService", "GetEntryFromLedger"));
            self.inner.unary(req, path, codec).await
        }
        /// Irrevocably deletes a ledger and its backing storage.
        pub async fn delete_ledger(
            &mut self,
            request: impl tonic::IntoRequest<super::DeleteLedgerRequest>,
        ) -> std::result::Result<tonic::Response<super::Empty>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/porage.PorageService/DeleteLedger",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("porage.PorageService", "DeleteLedger"));
            self.inner.unary(req, path, codec).await
        }
        /// Returns the number of indexed entries in a ledger.
        pub async fn ledger_length(
            &mut self,
            request: impl tonic::IntoRequest<super::LedgerLengthRequest>,
        ) -> std::result::Result<
            tonic::Response<super::LedgerLengthResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/porage.PorageService/LedgerLength",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("porage.PorageService", "LedgerLength"));
            self.inner.unary(req, path, codec).await
        }
        /// Lists the IDs of every open ledger, unordered.
        pub async fn list_ledgers(
            &mut self,
            request: impl tonic::IntoRequest<super::Empty>,
        ) -> std::result::Result<
            tonic::Response<super::ListLedgersResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/porage.PorageService/ListLedgers",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("porage.PorageService", "ListLedgers"));
            self.inner.unary(req, path, codec).await
        }
        /// Lists the server's running background workers.
        pub async fn list_workers(
            &mut self,
            request: impl tonic::IntoRequest<super::Empty>,
        ) -> std::result::Result<
            tonic::Response<super::ListWorkersResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/porage.PorageService/ListWorkers",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("porage.PorageService", "ListWorkers"));
            self.inner.unary(req, path, codec).await
        }
    }
}
/// Generated server implementations.
pub mod porage_service_server {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented for use with PorageServiceServer.
    #[async_trait]
    pub trait PorageService: Send + Sync + 'static {
        /// Creates a new ledger. Fails with ALREADY_EXISTS if the ledger is open.
        async fn create_ledger(
            &self,
            request: tonic::Request<super::CreateLedgerRequest>,
        ) -> std::result::Result<tonic::Response<super::Empty>, tonic::Status>;
        /// Appends an entry to a ledger, returning its assigned entry ID once the
        /// write is durably journaled.
        async fn append_entry_on_ledger(
            &self,
            request: tonic::Request<super::AppendEntryOnLedgerRequest>,
        ) -> std::result::Result<
            tonic::Response<super::AppendEntryOnLedgerResponse>,
            tonic::Status,
        >;
        /// Fetches the payload of one entry. Fails with NOT_FOUND for a missing
        /// ledger or entry.
        async fn get_entry_from_ledger(
            &self,
            request: tonic::Request<super::GetEntryFromLedgerRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetEntryFromLedgerResponse>,
            tonic::Status,
        >;
        /// Irrevocably deletes a ledger and its backing storage.
        async fn delete_ledger(
            &self,
            request: tonic::Request<super::DeleteLedgerRequest>,
        ) -> std::result::Result<tonic::Response<super::Empty>, tonic::Status>;
        /// Returns the number of indexed entries in a ledger.
        async fn ledger_length(
            &self,
            request: tonic::Request<super::LedgerLengthRequest>,
        ) -> std::result::Result<
            tonic::Response<super::LedgerLengthResponse>,
            tonic::Status,
        >;
        /// Lists the IDs of every open ledger, unordered.
        async fn list_ledgers(
            &self,
            request: tonic::Request<super::Empty>,
        ) -> std::result::Result<
            tonic::Response<super::ListLedgersResponse>,
            tonic::Status,
        >;
        /// Lists the server's running background workers.
        async fn list_workers(
            &self,
            request: tonic::Request<super::Empty>,
        ) -> std::result::Result<
            tonic::Response<super::ListWorkersResponse>,
            tonic::Status,
        >;
    }
    /// Porage record store service.
    #[derive(Debug)]
    pub struct PorageServiceServer<T: PorageService> {
        inner: Arc<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
        max_decoding_message_size: Option<usize>,
        max_encoding_message_size: Option<usize>,
    }
    impl<T: PorageService> PorageServiceServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
                max_decoding_message_size: None,
                max_encoding_message_size: None,
            }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.max_decoding_message_size = Some(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.max_encoding_message_size = Some(limit);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for PorageServiceServer<T>
    where
        T: PorageService,
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/porage.PorageService/CreateLedger" => {
                    #[allow(non_camel_case_types)]
                    struct CreateLedgerSvc<T: PorageService>(pub Arc<T>);
                    impl<
                        T: PorageService,
                    > tonic::server::UnaryService<super::CreateLedgerRequest>
                    for CreateLedgerSvc<T> {
                        type Response = super::Empty;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::CreateLedgerRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as PorageService>::create_ledger(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = CreateLedgerSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/porage.PorageService/AppendEntryOnLedger" => {
                    #[allow(non_camel_case_types)]
                    struct AppendEntryOnLedgerSvc<T: PorageService>(pub Arc<T>);
                    impl<
                        T: PorageService,
                    > tonic::server::UnaryService<super::AppendEntryOnLedgerRequest>
                    for AppendEntryOnLedgerSvc<T> {
                        type Response = super::AppendEntryOnLedgerResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::AppendEntryOnLedgerRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as PorageService>::append_entry_on_ledger(&inner, request)
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = AppendEntryOnLedgerSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/porage.PorageService/GetEntryFromLedger" => {
                    #[allow(non_camel_case_types)]
                    struct GetEntryFromLedgerSvc<T: PorageService>(pub Arc<T>);
                    impl<
                        T: PorageService,
                    > tonic::server::UnaryService<super::GetEntryFromLedgerRequest>
                    for GetEntryFromLedgerSvc<T> {
                        type Response = super::GetEntryFromLedgerResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::GetEntryFromLedgerRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as PorageService>::get_entry_from_ledger(&inner, request)
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = GetEntryFromLedgerSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/porage.PorageService/DeleteLedger" => {
                    #[allow(non_camel_case_types)]
                    struct DeleteLedgerSvc<T: PorageService>(pub Arc<T>);
                    impl<
                        T: PorageService,
                    > tonic::server::UnaryService<super::DeleteLedgerRequest>
                    for DeleteLedgerSvc<T> {
                        type Response = super::Empty;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::DeleteLedgerRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as PorageService>::delete_ledger(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = DeleteLedgerSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/porage.PorageService/LedgerLength" => {
                    #[allow(non_camel_case_types)]
                    struct LedgerLengthSvc<T: PorageService>(pub Arc<T>);
                    impl<
                        T: PorageService,
                    > tonic::server::UnaryService<super::LedgerLengthRequest>
                    for LedgerLengthSvc<T> {
                        type Response = super::LedgerLengthResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::LedgerLengthRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as PorageService>::ledger_length(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = LedgerLengthSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/porage.PorageService/ListLedgers" => {
                    #[allow(non_camel_case_types)]
                    struct ListLedgersSvc<T: PorageService>(pub Arc<T>);
                    impl<T: PorageService> tonic::server::UnaryService<super::Empty>
                    for ListLedgersSvc<T> {
                        type Response = super::ListLedgersResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::Empty>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as PorageService>::list_ledgers(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = ListLedgersSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/porage.PorageService/ListWorkers" => {
                    #[allow(non_camel_case_types)]
                    struct ListWorkersSvc<T: PorageService>(pub Arc<T>);
                    impl<T: PorageService> tonic::server::UnaryService<super::Empty>
                    for ListWorkersSvc<T> {
                        type Response = super::ListWorkersResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::Empty>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as PorageService>::list_workers(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = ListWorkersSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => {
                    Box::pin(async move {
                        Ok(
                            http::Response::builder()
                                .status(200)
                                .header("grpc-status", "12")
                                .header("content-type", "application/grpc")
                                .body(empty_body())
                                .unwrap(),
                        )
                    })
                }
            }
        }
    }
    impl<T: PorageService> Clone for PorageServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
                max_decoding_message_size: self.max_decoding_message_size,
                max_encoding_message_size: self.max_encoding_message_size,
            }
        }
    }
    impl<T: PorageService> tonic::server::NamedService for PorageServiceServer<T> {
        const NAME: &'static str = "porage.PorageService";
    }
}
