use client::{LibraryClient, Session};
use shared::Identity;
use yew::platform::spawn_local;
use yew::prelude::*;

/// Session snapshot plus the client that owns it, shared with every view.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub client: LibraryClient,
    pub session: Session,
}

impl SessionContext {
    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider is mounted at the root")
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub client: LibraryClient,
    #[prop_or_default]
    pub children: Html,
}

/// Re-renders the tree on every session change and runs the startup check
/// of the persisted credential once.
#[function_component(SessionProvider)]
pub fn session_provider(props: &Props) -> Html {
    let session = use_state_eq(|| props.client.session.session());

    {
        let session = session.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            let subscription = client
                .session
                .subscribe(move |snapshot| session.set(snapshot.clone()));
            spawn_local(async move {
                client.session.initialize().await;
                log::info!(
                    "Session initialized, authenticated={}",
                    client.session.session().is_authenticated()
                );
            });
            move || drop(subscription)
        });
    }

    let context = SessionContext {
        client: props.client.clone(),
        session: (*session).clone(),
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            { props.children.clone() }
        </ContextProvider<SessionContext>>
    }
}
