use actix_web::HttpRequest;

/// Extract the client's IP address from the request. `CF-Connecting-IP` wins,
/// then the first `X-Forwarded-For` value, then the socket peer address.
pub fn get_client_ip(req: &HttpRequest) -> String {
    if let Some(cf_ip) = req.headers().get("cf-connecting-ip") {
        if let Ok(s) = cf_ip.to_str() {
            return s.trim().to_string();
        }
    }
    if let Some(forwarded) = req.headers().get("x-forwarded-for") {
        if let Ok(s) = forwarded.to_str() {
            return s.split(',').next().unwrap_or("").trim().to_string();
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
