use glib::MainContext;
use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

pub fn glib_channel<T: Send + 'static>() -> (glib::Sender<T>, glib::Receiver<T>) {
    MainContext::channel(glib::Priority::default())
}

/// Runs a fallible future on the Tokio runtime and delivers its result back
/// to the GTK main thread over a glib channel. All state mutation stays on
/// the main thread; handlers attach to the returned receiver.
pub fn run_async_to_main<T, E, Fut>(fut: Fut) -> glib::Receiver<Result<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: std::future::Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = glib_channel::<Result<T, E>>();
    spawn_async(async move {
        let res = fut.await;
        let _ = tx.send(res);
    });
    rx
}

pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_url;

    #[test]
    fn bare_host_gets_http_scheme() {
        assert_eq!(normalize_url("localhost:3001"), "http://localhost:3001");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(normalize_url("https://pb.example.org"), "https://pb.example.org");
        assert_eq!(normalize_url("http://10.0.0.2:3001"), "http://10.0.0.2:3001");
    }

    #[test]
    fn whitespace_is_trimmed_and_empty_stays_empty() {
        assert_eq!(normalize_url("  localhost:3001  "), "http://localhost:3001");
        assert_eq!(normalize_url("   "), "");
    }
}
