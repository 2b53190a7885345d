use crate::{
    include_res,
    res::{escape, fill, markdown},
};

use super::{
    forms::{CreateProfileForm, FieldErrors, UpdateProfileForm},
    models::{FeedEntry, Profile, StatusMessage},
};

fn avatar(profile_image_url: &str, name: &str) -> String {
    if profile_image_url.is_empty() {
        return String::new();
    }
    format!(
        r#"<img src="{}" alt="{}" width="80">"#,
        escape(profile_image_url),
        escape(name)
    )
}

fn error(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

fn items<T>(list: &[T], empty: &str, item: impl Fn(&T) -> String) -> String {
    if list.is_empty() {
        return fill(include_res!(str, "/pages/mini_fb/empty_item.html"), &[("text", empty)]);
    }
    list.iter().map(item).collect()
}

pub(crate) fn profile_list(profiles: &[Profile]) -> String {
    let profile_items = items(profiles, "Nobody here yet.", |profile| {
        fill(
            include_res!(str, "/pages/mini_fb/profile_item.html"),
            &[
                ("id", profile.id.to_string()),
                ("avatar", avatar(&profile.profile_image_url, &profile.full_name())),
                ("name", escape(&profile.full_name())),
                ("city", escape(&profile.city)),
            ],
        )
    });
    fill(
        include_res!(str, "/pages/mini_fb/profiles.html"),
        &[("profile_items", profile_items)],
    )
}

pub(crate) fn profile_page(profile: &Profile, statuses: &[StatusMessage], friends: &[Profile]) -> String {
    let status_items = items(statuses, "No status messages yet.", |status| {
        fill(
            include_res!(str, "/pages/mini_fb/status_item.html"),
            &[
                ("id", status.id.to_string()),
                ("message", markdown(&status.message)),
                ("posted_at", status.posted_at()),
            ],
        )
    });
    let friend_items = items(friends, "No friends yet.", |friend| {
        fill(
            include_res!(str, "/pages/mini_fb/friend_item.html"),
            &[
                ("id", friend.id.to_string()),
                ("avatar", avatar(&friend.profile_image_url, &friend.full_name())),
                ("name", escape(&friend.full_name())),
            ],
        )
    });

    fill(
        include_res!(str, "/pages/mini_fb/profile.html"),
        &[
            ("id", profile.id.to_string()),
            ("name", escape(&profile.full_name())),
            ("avatar", avatar(&profile.profile_image_url, &profile.full_name())),
            ("city", escape(&profile.city)),
            ("email", escape(&profile.email)),
            ("status_items", status_items),
            ("friend_items", friend_items),
        ],
    )
}

pub(crate) fn create_profile_form(form: &CreateProfileForm, errors: &FieldErrors) -> String {
    fill(
        include_res!(str, "/pages/mini_fb/create_profile.html"),
        &[
            ("first_name", escape(&form.first_name)),
            ("last_name", escape(&form.last_name)),
            ("city", escape(&form.city)),
            ("email", escape(&form.email)),
            ("profile_image_url", escape(&form.profile_image_url)),
            ("first_name_error", error(errors, "first_name")),
            ("last_name_error", error(errors, "last_name")),
            ("city_error", error(errors, "city")),
            ("email_error", error(errors, "email")),
            ("profile_image_url_error", error(errors, "profile_image_url")),
        ],
    )
}

pub(crate) fn update_profile_form(profile: &Profile, form: &UpdateProfileForm, errors: &FieldErrors) -> String {
    fill(
        include_res!(str, "/pages/mini_fb/update_profile.html"),
        &[
            ("id", profile.id.to_string()),
            ("name", escape(&profile.full_name())),
            ("city", escape(&form.city)),
            ("email", escape(&form.email)),
            ("profile_image_url", escape(&form.profile_image_url)),
            ("city_error", error(errors, "city")),
            ("email_error", error(errors, "email")),
            ("profile_image_url_error", error(errors, "profile_image_url")),
        ],
    )
}

pub(crate) fn create_status_form(profile: &Profile, message: &str, errors: &FieldErrors) -> String {
    fill(
        include_res!(str, "/pages/mini_fb/create_status.html"),
        &[
            ("id", profile.id.to_string()),
            ("name", escape(&profile.full_name())),
            ("message", escape(message)),
            ("message_error", error(errors, "message")),
        ],
    )
}

pub(crate) fn update_status_form(
    status: &StatusMessage,
    author: &Profile,
    message: &str,
    errors: &FieldErrors,
) -> String {
    fill(
        include_res!(str, "/pages/mini_fb/update_status.html"),
        &[
            ("id", status.id.to_string()),
            ("profile_id", status.profile_id.to_string()),
            ("name", escape(&author.full_name())),
            ("message", escape(message)),
            ("message_error", error(errors, "message")),
        ],
    )
}

pub(crate) fn delete_status_confirm(status: &StatusMessage, author: &Profile) -> String {
    fill(
        include_res!(str, "/pages/mini_fb/delete_status.html"),
        &[
            ("id", status.id.to_string()),
            ("profile_id", status.profile_id.to_string()),
            ("name", escape(&author.full_name())),
            ("message", markdown(&status.message)),
            ("posted_at", status.posted_at()),
        ],
    )
}

pub(crate) fn friend_suggestions(profile: &Profile, suggestions: &[Profile]) -> String {
    let id = profile.id.to_string();
    let suggestion_items = items(suggestions, "You already know everyone.", |other| {
        fill(
            include_res!(str, "/pages/mini_fb/suggestion_item.html"),
            &[
                ("id", id.clone()),
                ("other_id", other.id.to_string()),
                ("avatar", avatar(&other.profile_image_url, &other.full_name())),
                ("name", escape(&other.full_name())),
                ("city", escape(&other.city)),
            ],
        )
    });
    fill(
        include_res!(str, "/pages/mini_fb/friend_suggestions.html"),
        &[
            ("id", id),
            ("name", escape(&profile.full_name())),
            ("suggestion_items", suggestion_items),
        ],
    )
}

pub(crate) fn news_feed(profile: &Profile, feed: &[FeedEntry]) -> String {
    let feed_items = items(feed, "Nothing to read yet.", |entry| {
        let name = format!("{} {}", entry.first_name, entry.last_name);
        fill(
            include_res!(str, "/pages/mini_fb/feed_item.html"),
            &[
                ("profile_id", entry.profile_id.to_string()),
                ("avatar", avatar(&entry.profile_image_url, &name)),
                ("name", escape(&name)),
                ("message", markdown(&entry.message)),
                ("posted_at", entry.posted_at()),
            ],
        )
    });
    fill(
        include_res!(str, "/pages/mini_fb/news_feed.html"),
        &[
            ("id", profile.id.to_string()),
            ("name", escape(&profile.full_name())),
            ("feed_items", feed_items),
        ],
    )
}
