use super::{app, routing, App};

pub struct Dispatcher<T>(std::marker::PhantomData<*const T>);

impl Dispatcher<super::RoutingPanel> {
    pub fn handle(app: &mut App, resp: Option<routing::Response>) {
        if let Some(resp) = resp {
            app.clear_last_err();
            app.send_req(app::Request::from(resp));
        }
    }
}
