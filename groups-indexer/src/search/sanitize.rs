//! Clean-up of search results before they leave the service.

use groups_indexer_shared::GroupSearchDocument;

/// Strip private fields and make the image link public.
///
/// The leader email is always cleared. A present image key is rewritten to
/// `image_url_prefix + "/" + key`.
pub fn sanitize(mut doc: GroupSearchDocument, image_url_prefix: &str) -> GroupSearchDocument {
    doc.leader_email = None;

    if let Some(key) = doc.image_url.take() {
        doc.image_url = if key.is_empty() {
            None
        } else {
            Some(format!("{}/{}", image_url_prefix, key))
        };
    }

    doc
}
