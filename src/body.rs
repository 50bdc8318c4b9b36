use http_body_util::Full;
use hyper::body::Bytes;

pub type ResponseBody = Full<Bytes>;

pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
}
