use ela_cli::{NodeRpc, RpcError, RpcValue};
use jsonrpsee::{
    server::{Server, ServerHandle},
    types::ErrorObjectOwned,
    RpcModule,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, Once};
use url::Url;

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Records every call and answers each one with the same canned reply.
pub struct MockNode {
    reply: Result<RpcValue, RpcError>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockNode {
    pub fn replying(value: Value) -> Self {
        Self {
            reply: Ok(value.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: RpcError) -> Self {
        Self {
            reply: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl NodeRpc for MockNode {
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<RpcValue, RpcError> {
        self.calls.lock().unwrap().push((method.to_string(), params));
        self.reply.clone()
    }
}

type Calls = Arc<Mutex<Vec<(String, Vec<Value>)>>>;

/// A JSON-RPC node over HTTP that knows a single method and answers it with
/// a canned reply, recording what it was asked.
pub struct StubNode {
    pub url: Url,
    calls: Calls,
    _handle: ServerHandle,
}

impl StubNode {
    pub async fn start(method: &'static str, reply: Result<Value, ErrorObjectOwned>) -> Self {
        let calls = Calls::default();
        let mut module = RpcModule::new(calls.clone());
        module
            .register_method(method, move |params, calls| {
                let params: Vec<Value> = params.parse().unwrap_or_default();
                calls.lock().unwrap().push((method.to_string(), params));
                reply.clone()
            })
            .expect("register method");

        let server = Server::builder()
            .build("127.0.0.1:0")
            .await
            .expect("build server");
        let addr = server.local_addr().expect("local addr");
        let handle = server.start(module);

        Self {
            url: Url::parse(&format!("http://{addr}")).expect("url"),
            calls,
            _handle: handle,
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}
