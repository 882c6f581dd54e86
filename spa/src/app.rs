use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    api,
    components::composite::navigation_bar::NavigationBar,
    router::{switch, Route},
    session_context::SessionProvider,
};

#[function_component(App)]
pub fn app() -> Html {
    let client = use_memo((), |_| api::library_client());

    match &*client {
        Ok(client) => html! {
            <SessionProvider client={client.clone()}>
                <BrowserRouter>
                    <div class="d-flex flex-column min-vh-100">
                        <NavigationBar />
                        <main class="flex-grow-1">
                            <Switch<Route> render={switch} />
                        </main>
                    </div>
                </BrowserRouter>
            </SessionProvider>
        },
        Err(error) => {
            log::error!("Fail to build api client, error: {error}");
            html! {
                <div class="container mt-5">
                    <div class="alert alert-danger" role="alert">
                        {"The library service is not configured correctly."}
                    </div>
                </div>
            }
        }
    }
}
