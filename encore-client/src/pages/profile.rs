use leptos::*;
use leptos_router::{use_navigate, use_params_map};
use web_sys::HtmlInputElement;

use encore_common::{
    profile::{CreateProfileRequest, Profile, UpdateProfileRequest},
    validate::{ProfileValidator, RequestValidator},
};

use crate::{
    components::{error::ErrorText, loading::Loading, modal::AlertModal},
    fetch::{redirect_to_login_on_expiry, use_resource, FetchState},
    forms,
    pages::Page,
    session::{require_api, use_session},
};

/// Editing state of the owned-profile page. One render function per
/// state; transitions happen only through the buttons each state shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProfileMode {
    Creating,
    Viewing,
    Editing,
}

/// Raw form state before coercion and validation.
#[derive(Clone, Debug, Default)]
struct ProfileInput {
    title: String,
    discipline: String,
    bio: String,
    website: String,
}

impl ProfileInput {
    fn from_profile(profile: &Profile) -> Self {
        Self {
            title: profile.title.clone(),
            discipline: profile.discipline.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
            website: profile.website.clone().unwrap_or_default(),
        }
    }
}

/// Coerce the raw input into a profile payload, or explain why it cannot
/// be submitted yet.
fn build_request(
    input: &ProfileInput,
    portfolio_urls: Vec<String>,
) -> Result<CreateProfileRequest, String> {
    let request = CreateProfileRequest {
        title: input.title.trim().to_owned(),
        discipline: input.discipline.trim().to_owned(),
        bio: forms::optional_text(&input.bio),
        website: forms::optional_text(&input.website),
        portfolio_urls,
    };
    ProfileValidator::validate(&request)?;
    Ok(request)
}

/// The session user's own profile: created when none exists yet, viewed
/// and edited afterwards.
#[component]
pub fn MyProfile(cx: Scope) -> impl IntoView {
    let session = use_session(cx);
    let key = Signal::derive(cx, move || session.user().map(|user| user.id));
    let profiles = use_resource(cx, key, move |user_id| async move {
        require_api()?.profiles_for_user(user_id).await
    });
    redirect_to_login_on_expiry(cx, profiles);

    let profile = create_rw_signal(cx, None::<Profile>);
    let mode = create_rw_signal(cx, None::<ProfileMode>);
    let alert = create_rw_signal(cx, None::<String>);

    // Seed local state from the fetch exactly once; afterwards saves keep
    // it current without refetching.
    create_effect(cx, move |_| {
        profiles.with(|state| {
            let Some(owned) = state.data() else { return };
            if mode.get_untracked().is_none() {
                let first = owned.first().cloned();
                let initial = if first.is_some() {
                    ProfileMode::Viewing
                } else {
                    ProfileMode::Creating
                };
                profile.set(first);
                mode.set(Some(initial));
            }
        });
    });

    view! { cx,
        <main class="container py-4">
            <h3>"Your profile"</h3>
            {move || {
                if profiles.with(FetchState::is_pending) && mode.get().is_none() {
                    return view! { cx, <Loading/> }.into_view(cx);
                }
                if let Some(error) = profiles.with(|state| state.error().cloned()) {
                    return view! { cx, <p class="text-danger">{error.message}</p> }.into_view(cx);
                }
                match mode.get() {
                    None => view! { cx, <Loading/> }.into_view(cx),
                    Some(ProfileMode::Creating) => view! { cx,
                        <p>"You have no profile yet. Tell the marketplace what you do."</p>
                        <ProfileForm profile=profile mode=mode alert=alert/>
                    }
                    .into_view(cx),
                    Some(ProfileMode::Viewing) => viewing(cx, profile, mode),
                    Some(ProfileMode::Editing) => view! { cx,
                        <ProfileForm profile=profile mode=mode alert=alert/>
                    }
                    .into_view(cx),
                }
            }}
            <AlertModal message=alert.read_only() on_close=move || alert.set(None)/>
        </main>
    }
}

/// Viewing state: the saved card plus the transition into editing.
fn viewing(cx: Scope, profile: RwSignal<Option<Profile>>, mode: RwSignal<Option<ProfileMode>>) -> View {
    let Some(current) = profile.get() else {
        return view! { cx, <Loading/> }.into_view(cx);
    };
    view! { cx,
        {profile_card(cx, &current)}
        <button
            class="btn btn-outline-primary"
            on:click=move |_| mode.set(Some(ProfileMode::Editing))
        >"Edit"</button>
    }
    .into_view(cx)
}

/// Read-only rendering of a profile, shared by the owned and public
/// profile pages.
fn profile_card(cx: Scope, profile: &Profile) -> View {
    let links = profile
        .portfolio_urls
        .iter()
        .map(|url| {
            let href = url.clone();
            view! { cx,
                <li><a href=href.clone() target="_blank" rel="noreferrer">{href}</a></li>
            }
        })
        .collect::<Vec<_>>();
    view! { cx,
        <div class="card mb-3">
            <div class="card-body">
                <h5 class="card-title">{profile.title.clone()}</h5>
                <h6 class="card-subtitle mb-2 text-body-secondary">{profile.discipline.clone()}</h6>
                {profile.bio.clone().map(|bio| view! { cx, <p class="card-text">{bio}</p> })}
                {profile.website.clone().map(|website| view! { cx,
                    <a class="card-link" href=website.clone() target="_blank" rel="noreferrer">
                        {website}
                    </a>
                })}
                {(!links.is_empty()).then(|| view! { cx,
                    <h6 class="mt-3">"Portfolio"</h6>
                    <ul>{links}</ul>
                })}
            </div>
        </div>
    }
    .into_view(cx)
}

/// Creating and editing states share this form; which one it is follows
/// from whether a saved profile exists.
#[component]
fn ProfileForm(
    cx: Scope,
    profile: RwSignal<Option<Profile>>,
    mode: RwSignal<Option<ProfileMode>>,
    alert: RwSignal<Option<String>>,
) -> impl IntoView {
    let existing = profile.get_untracked();
    let input = create_rw_signal(
        cx,
        existing
            .as_ref()
            .map(ProfileInput::from_profile)
            .unwrap_or_default(),
    );
    let portfolio_urls = create_rw_signal(
        cx,
        existing
            .as_ref()
            .map(|profile| profile.portfolio_urls.clone())
            .unwrap_or_default(),
    );
    let (form_error, set_form_error) = create_signal(cx, None::<String>);
    let selected_files = create_rw_signal(cx, Vec::<web_sys::File>::new());
    let (uploading, set_uploading) = create_signal(cx, false);

    let upload_action = create_action(cx, move |files: &Vec<web_sys::File>| {
        let files = files.clone();
        async move {
            set_uploading.update(|flag| *flag = true);
            let result = async { require_api()?.upload_files(&files).await }.await;
            set_uploading.update(|flag| *flag = false);
            match result {
                Ok(urls) => {
                    portfolio_urls.update(|existing| existing.extend(urls));
                    selected_files.set(Vec::new());
                }
                Err(error) => set_form_error.update(|message| *message = Some(error.to_string())),
            }
        }
    });

    let save_action = create_action(
        cx,
        move |(existing_id, request): &(Option<i64>, CreateProfileRequest)| {
            let existing_id = *existing_id;
            let request = request.clone();
            async move {
                let result = async {
                    let api = require_api()?;
                    match existing_id {
                        Some(id) => {
                            let update = UpdateProfileRequest {
                                title: Some(request.title.clone()),
                                discipline: Some(request.discipline.clone()),
                                bio: request.bio.clone(),
                                website: request.website.clone(),
                                portfolio_urls: Some(request.portfolio_urls.clone()),
                            };
                            api.update_profile(id, &update).await
                        }
                        None => api.create_profile(&request).await,
                    }
                }
                .await;
                match result {
                    Ok(saved) => {
                        set_form_error.update(|message| *message = None);
                        alert.set(Some(if existing_id.is_some() {
                            "Profile saved.".to_owned()
                        } else {
                            "Profile created.".to_owned()
                        }));
                        profile.set(Some(saved));
                        mode.set(Some(ProfileMode::Viewing));
                    }
                    Err(error) if error.is_unauthorized() => {
                        let navigate = use_navigate(cx);
                        if let Err(error) = navigate(Page::Login.path(), Default::default()) {
                            log::error!("{error}");
                        }
                    }
                    Err(error) => {
                        set_form_error.update(|message| *message = Some(error.to_string()));
                    }
                }
            }
        },
    );

    let existing_id = existing.as_ref().map(|profile| profile.id);
    let submit = move |_| {
        match build_request(&input.get_untracked(), portfolio_urls.get_untracked()) {
            Ok(request) => save_action.dispatch((existing_id, request)),
            Err(message) => set_form_error.update(|error| *error = Some(message)),
        }
    };

    let pick_files = move |ev| {
        let element = event_target::<HtmlInputElement>(&ev);
        let mut files = Vec::new();
        if let Some(list) = element.files() {
            for index in 0..list.length() {
                if let Some(file) = list.item(index) {
                    files.push(file);
                }
            }
        }
        selected_files.set(files);
    };

    let upload = move |_| {
        let files = selected_files.get_untracked();
        if files.is_empty() {
            set_form_error.update(|error| *error = Some("Choose files to upload first".to_owned()));
            return;
        }
        upload_action.dispatch(files);
    };

    let can_cancel = existing_id.is_some();

    view! { cx,
        <form on:submit=|ev| ev.prevent_default()>
            <div class="form-group mb-3">
                <label for="profile-title">"Title"</label>
                <input
                    class="form-control"
                    type="text"
                    id="profile-title"
                    name="profile-title"
                    prop:value=move || input.with(|input| input.title.clone())
                    on:input=move |ev| input.update(|input| input.title = event_target_value(&ev))
                />
            </div>
            <div class="form-group mb-3">
                <label for="profile-discipline">"Discipline"</label>
                <input
                    class="form-control"
                    type="text"
                    id="profile-discipline"
                    name="profile-discipline"
                    placeholder="music, photography, design..."
                    prop:value=move || input.with(|input| input.discipline.clone())
                    on:input=move |ev| {
                        input.update(|input| input.discipline = event_target_value(&ev));
                    }
                />
            </div>
            <div class="form-group mb-3">
                <label for="profile-bio">"Bio"</label>
                <textarea
                    class="form-control"
                    id="profile-bio"
                    name="profile-bio"
                    rows="4"
                    prop:value=move || input.with(|input| input.bio.clone())
                    on:input=move |ev| input.update(|input| input.bio = event_target_value(&ev))
                ></textarea>
            </div>
            <div class="form-group mb-3">
                <label for="profile-website">"Website"</label>
                <input
                    class="form-control"
                    type="url"
                    id="profile-website"
                    name="profile-website"
                    prop:value=move || input.with(|input| input.website.clone())
                    on:input=move |ev| {
                        input.update(|input| input.website = event_target_value(&ev));
                    }
                />
            </div>
            <div class="form-group mb-3">
                <label for="profile-portfolio">"Portfolio files"</label>
                <div class="input-group">
                    <input
                        class="form-control"
                        type="file"
                        id="profile-portfolio"
                        name="profile-portfolio"
                        multiple
                        on:change=pick_files
                    />
                    <button
                        class="btn btn-outline-secondary"
                        type="button"
                        prop:disabled=move || uploading.get()
                        on:click=upload
                    >"Upload"</button>
                </div>
                <ul class="mt-2">
                    {move || portfolio_urls
                        .get()
                        .into_iter()
                        .map(|url| view! { cx, <li>{url}</li> })
                        .collect::<Vec<_>>()}
                </ul>
            </div>
            <ErrorText error=form_error.into()/>
            <button class="btn btn-primary" type="submit" on:click=submit>"Save"</button>
            {can_cancel.then(|| view! { cx,
                <button
                    class="btn btn-link"
                    type="button"
                    on:click=move |_| mode.set(Some(ProfileMode::Viewing))
                >"Cancel"</button>
            })}
        </form>
    }
}

/// Public read-only profile page, keyed by the `:id` route parameter.
#[component]
pub fn ProfileView(cx: Scope) -> impl IntoView {
    let params = use_params_map(cx);
    let id = Signal::derive(cx, move || {
        params.with(|params| params.get("id").and_then(|id| id.parse::<i64>().ok()))
    });
    let profile = use_resource(cx, id, move |id| async move {
        require_api()?.profile(id).await
    });
    redirect_to_login_on_expiry(cx, profile);

    view! { cx,
        <main class="container py-4">
            {move || profile.with(|state| match state {
                FetchState::Idle | FetchState::Loading => view! { cx, <Loading/> }.into_view(cx),
                FetchState::Failed(error) => view! { cx,
                    <p class="text-danger">{error.message.clone()}</p>
                }
                .into_view(cx),
                FetchState::Loaded(profile) => profile_card(cx, profile),
            })}
        </main>
    }
}

#[cfg(test)]
mod test {
    use super::{build_request, ProfileInput};

    #[test]
    fn build_request_should_coerce_blank_optionals() {
        let input = ProfileInput {
            title: " Cellist ".to_owned(),
            discipline: "music".to_owned(),
            bio: String::new(),
            website: "  ".to_owned(),
        };
        let request = build_request(&input, vec!["https://cdn.example/a.jpg".to_owned()]).unwrap();
        assert_eq!(request.title, "Cellist");
        assert_eq!(request.bio, None);
        assert_eq!(request.website, None);
        assert_eq!(request.portfolio_urls.len(), 1);
    }

    #[test]
    fn build_request_should_require_title_and_discipline() {
        let input = ProfileInput {
            title: String::new(),
            discipline: "music".to_owned(),
            bio: String::new(),
            website: String::new(),
        };
        assert!(build_request(&input, Vec::new()).is_err());
    }
}
