//! Interface label catalog for both publication languages.

use crate::locale::Language;

type Catalog = &'static [(&'static str, &'static str)];

const EN: Catalog = &[
    // Navigation
    ("home", "Home"),
    ("reports", "Investigation Reports"),
    ("recommendations", "Safety Recommendations"),
    ("about", "About"),
    ("login", "Login"),
    ("logout", "Logout"),
    ("dashboard", "Dashboard"),
    // Common
    ("search", "Search"),
    ("filter", "Filter"),
    ("date", "Date"),
    ("category", "Category"),
    ("status", "Status"),
    ("actions", "Actions"),
    ("edit", "Edit"),
    ("delete", "Delete"),
    ("view", "View"),
    ("add", "Add"),
    ("save", "Save"),
    ("cancel", "Cancel"),
    ("loading", "Loading..."),
    // Reports
    ("reportTitle", "Report Title"),
    ("reportNumber", "Report Number"),
    ("investigationDate", "Investigation Date"),
    ("publicationDate", "Publication Date"),
    ("aircraftType", "Aircraft Type"),
    ("location", "Location"),
    ("description", "Description"),
    ("finalReport", "Final Report"),
    // Safety recommendations
    ("recommendationTitle", "Recommendation Title"),
    ("recommendationNumber", "Recommendation Number"),
    ("relatedReport", "Related Report"),
    ("recipient", "Recipient"),
    ("recommendationStatus", "Status"),
    // Authentication
    ("email", "Email"),
    ("password", "Password"),
    ("twoFactorCode", "Two-Factor Code"),
    ("sendCode", "Send Code"),
    ("verifyCode", "Verify Code"),
    ("loginSuccess", "Login successful"),
    ("loginError", "Login failed"),
    // Organization
    (
        "organizationName",
        "Hellenic Air and Rail Safety Investigation Authority",
    ),
    ("organizationShort", "HARSIA"),
    // Buttons
    ("downloadPDF", "Download PDF"),
    ("backToList", "Back to List"),
    // Status
    ("open", "Open"),
    ("closed", "Closed"),
    ("pending", "Pending"),
    ("implemented", "Implemented"),
];

const GR: Catalog = &[
    ("home", "Αρχική"),
    ("reports", "Εκθέσεις Διερεύνησης"),
    ("recommendations", "Συστάσεις Ασφαλείας"),
    ("about", "Σχετικά"),
    ("login", "Σύνδεση"),
    ("logout", "Αποσύνδεση"),
    ("dashboard", "Πίνακας Ελέγχου"),
    ("search", "Αναζήτηση"),
    ("filter", "Φίλτρο"),
    ("date", "Ημερομηνία"),
    ("category", "Κατηγορία"),
    ("status", "Κατάσταση"),
    ("actions", "Ενέργειες"),
    ("edit", "Επεξεργασία"),
    ("delete", "Διαγραφή"),
    ("view", "Προβολή"),
    ("add", "Προσθήκη"),
    ("save", "Αποθήκευση"),
    ("cancel", "Ακύρωση"),
    ("loading", "Φόρτωση..."),
    ("reportTitle", "Τίτλος Έκθεσης"),
    ("reportNumber", "Αριθμός Έκθεσης"),
    ("investigationDate", "Ημερομηνία Διερεύνησης"),
    ("publicationDate", "Ημερομηνία Δημοσίευσης"),
    ("aircraftType", "Τύπος Αεροσκάφους"),
    ("location", "Τοποθεσία"),
    ("description", "Περιγραφή"),
    ("finalReport", "Τελική Έκθεση"),
    ("recommendationTitle", "Τίτλος Σύστασης"),
    ("recommendationNumber", "Αριθμός Σύστασης"),
    ("relatedReport", "Σχετική Έκθεση"),
    ("recipient", "Παραλήπτης"),
    ("recommendationStatus", "Κατάσταση"),
    ("email", "Email"),
    ("password", "Κωδικός Πρόσβασης"),
    ("twoFactorCode", "Κωδικός Δύο Παραγόντων"),
    ("sendCode", "Αποστολή Κωδικού"),
    ("verifyCode", "Επαλήθευση Κωδικού"),
    ("loginSuccess", "Επιτυχής σύνδεση"),
    ("loginError", "Αποτυχία σύνδεσης"),
    (
        "organizationName",
        "Εθνικός Οργανισμός Διερεύνησης Αεροπορικών & Σιδηροδρομικών Ατυχημάτων & Ασφάλειας Μεταφορών",
    ),
    ("organizationShort", "ΕΟΔΑΣΑΑΜ"),
    ("downloadPDF", "Λήψη PDF"),
    ("backToList", "Επιστροφή στη Λίστα"),
    ("open", "Ανοικτό"),
    ("closed", "Κλειστό"),
    ("pending", "Εκκρεμές"),
    ("implemented", "Υλοποιημένο"),
];

fn catalog(lang: Language) -> Catalog {
    match lang {
        Language::En => EN,
        Language::Gr => GR,
    }
}

fn lookup(catalog: Catalog, key: &str) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Look up an interface label.
///
/// Falls back to the English label, then to the key itself, so a missing
/// translation shows up as readable text instead of an empty string.
pub fn translate<'a>(lang: Language, key: &'a str) -> &'a str {
    let found: Option<&'a str> = lookup(catalog(lang), key).or_else(|| lookup(EN, key));
    found.unwrap_or(key)
}

/// Every label for `lang`, with English filling any gaps.
pub fn labels(lang: Language) -> Vec<(&'static str, &'static str)> {
    EN.iter()
        .map(|(key, en)| (*key, lookup(catalog(lang), key).unwrap_or(*en)))
        .collect()
}
