//! Static country tables

use std::collections::HashMap;
use std::sync::LazyLock;

/// French (and a few English shorthand) names mapped to canonical English names.
///
/// Order matters: substring matching walks this table front to back.
pub(crate) const FRENCH_TO_ENGLISH: &[(&str, &str)] = &[
    // Europe
    ("france", "France"),
    ("allemagne", "Germany"),
    ("italie", "Italy"),
    ("espagne", "Spain"),
    ("royaume-uni", "United Kingdom"),
    ("angleterre", "United Kingdom"),
    ("écosse", "United Kingdom"),
    ("pays-bas", "Netherlands"),
    ("hollande", "Netherlands"),
    ("belgique", "Belgium"),
    ("suisse", "Switzerland"),
    ("autriche", "Austria"),
    ("portugal", "Portugal"),
    ("suède", "Sweden"),
    ("norvège", "Norway"),
    ("danemark", "Denmark"),
    ("finlande", "Finland"),
    ("pologne", "Poland"),
    ("république tchèque", "Czech Republic"),
    ("tchéquie", "Czech Republic"),
    ("hongrie", "Hungary"),
    ("roumanie", "Romania"),
    ("bulgarie", "Bulgaria"),
    ("grèce", "Greece"),
    ("croatie", "Croatia"),
    ("slovénie", "Slovenia"),
    ("slovaquie", "Slovakia"),
    ("estonie", "Estonia"),
    ("lettonie", "Latvia"),
    ("lituanie", "Lithuania"),
    ("irlande", "Ireland"),
    ("islande", "Iceland"),
    ("malte", "Malta"),
    ("chypre", "Cyprus"),
    ("serbie", "Serbia"),
    ("bosnie", "Bosnia and Herzegovina"),
    ("monténégro", "Montenegro"),
    ("macédoine", "North Macedonia"),
    ("albanie", "Albania"),
    ("moldavie", "Moldova"),
    ("ukraine", "Ukraine"),
    ("biélorussie", "Belarus"),
    ("russie", "Russia"),
    // Americas
    ("états-unis", "United States"),
    ("usa", "United States"),
    ("amérique", "United States"),
    ("canada", "Canada"),
    ("mexique", "Mexico"),
    ("brésil", "Brazil"),
    ("argentine", "Argentina"),
    ("chili", "Chile"),
    ("pérou", "Peru"),
    ("colombie", "Colombia"),
    ("venezuela", "Venezuela"),
    ("équateur", "Ecuador"),
    ("bolivie", "Bolivia"),
    ("paraguay", "Paraguay"),
    ("uruguay", "Uruguay"),
    ("guatemala", "Guatemala"),
    ("costa rica", "Costa Rica"),
    ("panama", "Panama"),
    ("cuba", "Cuba"),
    ("jamaïque", "Jamaica"),
    ("haïti", "Haiti"),
    ("république dominicaine", "Dominican Republic"),
    // Asia
    ("chine", "China"),
    ("japon", "Japan"),
    ("corée du sud", "South Korea"),
    ("corée du nord", "North Korea"),
    ("inde", "India"),
    ("pakistan", "Pakistan"),
    ("bangladesh", "Bangladesh"),
    ("sri lanka", "Sri Lanka"),
    ("thaïlande", "Thailand"),
    ("vietnam", "Vietnam"),
    ("cambodge", "Cambodia"),
    ("laos", "Laos"),
    ("myanmar", "Myanmar"),
    ("birmanie", "Myanmar"),
    ("malaisie", "Malaysia"),
    ("singapour", "Singapore"),
    ("indonésie", "Indonesia"),
    ("philippines", "Philippines"),
    ("brunei", "Brunei"),
    ("mongolie", "Mongolia"),
    ("kazakhstan", "Kazakhstan"),
    ("ouzbékistan", "Uzbekistan"),
    ("kirghizistan", "Kyrgyzstan"),
    ("tadjikistan", "Tajikistan"),
    ("turkménistan", "Turkmenistan"),
    ("afghanistan", "Afghanistan"),
    ("iran", "Iran"),
    ("irak", "Iraq"),
    ("syrie", "Syria"),
    ("turquie", "Turkey"),
    ("israël", "Israel"),
    ("palestine", "Palestine"),
    ("liban", "Lebanon"),
    ("jordanie", "Jordan"),
    ("arabie saoudite", "Saudi Arabia"),
    ("émirats arabes unis", "United Arab Emirates"),
    ("qatar", "Qatar"),
    ("koweït", "Kuwait"),
    ("bahreïn", "Bahrain"),
    ("oman", "Oman"),
    ("yémen", "Yemen"),
    // Africa
    ("maroc", "Morocco"),
    ("algérie", "Algeria"),
    ("tunisie", "Tunisia"),
    ("libye", "Libya"),
    ("égypte", "Egypt"),
    ("soudan", "Sudan"),
    ("éthiopie", "Ethiopia"),
    ("kenya", "Kenya"),
    ("tanzanie", "Tanzania"),
    ("ouganda", "Uganda"),
    ("rwanda", "Rwanda"),
    ("burundi", "Burundi"),
    ("congo", "Democratic Republic of the Congo"),
    ("république démocratique du congo", "Democratic Republic of the Congo"),
    ("rdc", "Democratic Republic of the Congo"),
    ("république du congo", "Republic of the Congo"),
    ("cameroun", "Cameroon"),
    ("nigeria", "Nigeria"),
    ("ghana", "Ghana"),
    ("côte d'ivoire", "Ivory Coast"),
    ("sénégal", "Senegal"),
    ("mali", "Mali"),
    ("burkina faso", "Burkina Faso"),
    ("niger", "Niger"),
    ("tchad", "Chad"),
    ("centrafrique", "Central African Republic"),
    ("gabon", "Gabon"),
    ("guinée équatoriale", "Equatorial Guinea"),
    ("sao tomé", "Sao Tome and Principe"),
    ("cap-vert", "Cape Verde"),
    ("guinée-bissau", "Guinea-Bissau"),
    ("guinée", "Guinea"),
    ("sierra leone", "Sierra Leone"),
    ("liberia", "Liberia"),
    ("togo", "Togo"),
    ("bénin", "Benin"),
    ("mauritanie", "Mauritania"),
    ("gambie", "Gambia"),
    ("afrique du sud", "South Africa"),
    ("namibie", "Namibia"),
    ("botswana", "Botswana"),
    ("zimbabwe", "Zimbabwe"),
    ("zambie", "Zambia"),
    ("malawi", "Malawi"),
    ("mozambique", "Mozambique"),
    ("madagascar", "Madagascar"),
    ("maurice", "Mauritius"),
    ("seychelles", "Seychelles"),
    ("comores", "Comoros"),
    ("djibouti", "Djibouti"),
    ("érythrée", "Eritrea"),
    ("somalie", "Somalia"),
    ("lesotho", "Lesotho"),
    ("eswatini", "Eswatini"),
    ("swaziland", "Eswatini"),
    // Oceania
    ("australie", "Australia"),
    ("nouvelle-zélande", "New Zealand"),
    ("fidji", "Fiji"),
    ("papouasie-nouvelle-guinée", "Papua New Guinea"),
    ("vanuatu", "Vanuatu"),
    ("samoa", "Samoa"),
    ("tonga", "Tonga"),
    ("îles salomon", "Solomon Islands"),
    ("micronésie", "Micronesia"),
    ("palau", "Palau"),
    ("nauru", "Nauru"),
    ("kiribati", "Kiribati"),
    ("tuvalu", "Tuvalu"),
];

/// Exact lookup by table key
pub(crate) static BY_KEY: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| FRENCH_TO_ENGLISH.iter().copied().collect());

/// Lower-cased canonical English name to the canonical spelling
pub(crate) static BY_ENGLISH: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    FRENCH_TO_ENGLISH
        .iter()
        .map(|&(_, english)| (english.to_lowercase(), english))
        .collect()
});

/// ISO 3166-1 alpha-2 codes for frequently requested countries
pub(crate) static ISO_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("France", "FR"),
        ("United States", "US"),
        ("United Kingdom", "GB"),
        ("Germany", "DE"),
        ("Italy", "IT"),
        ("Spain", "ES"),
        ("Japan", "JP"),
        ("China", "CN"),
        ("India", "IN"),
        ("Brazil", "BR"),
        ("Canada", "CA"),
        ("Australia", "AU"),
        ("Russia", "RU"),
        ("Mexico", "MX"),
        ("South Korea", "KR"),
        ("Netherlands", "NL"),
        ("Belgium", "BE"),
        ("Switzerland", "CH"),
        ("Sweden", "SE"),
        ("Norway", "NO"),
        ("Denmark", "DK"),
        ("Turkey", "TR"),
        ("Egypt", "EG"),
        ("Thailand", "TH"),
        ("Iran", "IR"),
    ])
});
