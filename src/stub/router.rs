use super::handler;
use super::handler::AttendanceQuery;
use super::state::StubPortal;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    portal: Arc<StubPortal>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let captcha = warp::get()
        .and(warp::path("api"))
        .and(warp::path("auth"))
        .and(warp::path("captcha"))
        .and(warp::path::end())
        .and(with(portal.clone()))
        .and_then(handler::issue_captcha);

    let login = warp::post()
        .and(warp::path("api"))
        .and(warp::path("auth"))
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(portal.clone()))
        .and_then(handler::login);

    let attendance = warp::get()
        .and(warp::path("api"))
        .and(warp::path("student"))
        .and(warp::path("attendance"))
        .and(warp::path::end())
        .and(warp::query::<AttendanceQuery>())
        .and(with(portal))
        .and_then(handler::attendance);

    captcha.or(login).or(attendance)
}

fn with(
    portal: Arc<StubPortal>,
) -> impl Filter<Extract = (Arc<StubPortal>,), Error = Infallible> + Clone {
    warp::any().map(move || portal.clone())
}
