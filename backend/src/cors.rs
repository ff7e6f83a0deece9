use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};
use rocket::http::Header;
use crate::config::ServerConfig;

pub struct CORS {
    config: ServerConfig,
}

impl CORS {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let Some(origin) = req.headers().get_one("Origin") else { return };

        if self.config.allows(origin) {
            res.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
            res.set_header(Header::new("Access-Control-Allow-Methods", "GET, POST, PATCH, DELETE, OPTIONS"));
            res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type, Authorization, Accept"));
            res.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
            res.set_header(Header::new("Access-Control-Max-Age", "86400"));
            res.set_header(Header::new("Vary", "Origin"));
        }
    }
}
